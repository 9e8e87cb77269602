//! Scripted data-structure operations: stack, queue, array, singly linked
//! list and binary search tree.
//!
//! A script is a list of operations applied in order, e.g.
//! `push,5;push,7;pop;top`. Operations that cannot apply to the current
//! state (popping an empty stack, deleting a missing value) are recorded and
//! reported in `results`; they never abort the run.
//!
//! Linked-list and tree nodes live in arenas (`Vec` of nodes linked by
//! index). Unlinked list nodes keep their slot, so node ids stay stable for
//! the whole trace. BST nodes are never removed; the first insert is the
//! root (id 0).

use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;

use serde::Serialize;

use crate::error::InputError;
use crate::instance::Operation;
use crate::traits::{join, Describe, StepSink, Summary, TracedAlgorithm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StructureKind {
    Stack,
    Queue,
    Array,
    LinkedList,
    Bst,
}

impl StructureKind {
    pub const ALL: [StructureKind; 5] = [
        StructureKind::Stack,
        StructureKind::Queue,
        StructureKind::Array,
        StructureKind::LinkedList,
        StructureKind::Bst,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            StructureKind::Stack => "Stack",
            StructureKind::Queue => "Queue",
            StructureKind::Array => "Array",
            StructureKind::LinkedList => "Linked List",
            StructureKind::Bst => "Binary Search Tree",
        }
    }

    /// Operation names a script for this structure may use.
    pub fn operations(&self) -> &'static [&'static str] {
        match self {
            StructureKind::Stack => &["push", "pop", "top"],
            StructureKind::Queue => &["enqueue", "dequeue", "front"],
            StructureKind::Array => &["insert", "delete", "search", "display"],
            StructureKind::LinkedList => &["insert", "delete", "search", "display"],
            StructureKind::Bst => &["insert", "search", "display"],
        }
    }
}

/// Validated operation. For arrays `Delete` carries an index, everywhere
/// else a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Push(i64),
    Pop,
    Top,
    Enqueue(i64),
    Dequeue,
    Front,
    Insert(i64),
    Delete(i64),
    Search(i64),
    Display,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Push(v) => write!(f, "push {v}"),
            Command::Pop => f.write_str("pop"),
            Command::Top => f.write_str("top"),
            Command::Enqueue(v) => write!(f, "enqueue {v}"),
            Command::Dequeue => f.write_str("dequeue"),
            Command::Front => f.write_str("front"),
            Command::Insert(v) => write!(f, "insert {v}"),
            Command::Delete(v) => write!(f, "delete {v}"),
            Command::Search(v) => write!(f, "search {v}"),
            Command::Display => f.write_str("display"),
        }
    }
}

fn command(kind: StructureKind, op: &Operation) -> Result<Command, InputError> {
    let allowed = kind.operations();
    if !allowed.contains(&op.name.as_str()) {
        return Err(InputError::Invalid(format!(
            "{} supports {}; found `{}`",
            kind.name(),
            allowed.join(", "),
            op.name
        )));
    }
    let valued = |make: fn(i64) -> Command| {
        op.value
            .map(make)
            .ok_or_else(|| InputError::Invalid(format!("`{}` needs a value", op.name)))
    };
    let bare = |cmd: Command| match op.value {
        Some(_) => Err(InputError::Invalid(format!("`{}` takes no value", op.name))),
        None => Ok(cmd),
    };
    match op.name.as_str() {
        "push" => valued(Command::Push),
        "pop" => bare(Command::Pop),
        "top" => bare(Command::Top),
        "enqueue" => valued(Command::Enqueue),
        "dequeue" => bare(Command::Dequeue),
        "front" => bare(Command::Front),
        "insert" => valued(Command::Insert),
        "delete" => valued(Command::Delete),
        "search" => valued(Command::Search),
        _ => bare(Command::Display),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureStepKind {
    /// push, enqueue or insert.
    Insert,
    /// pop, dequeue or delete.
    Remove,
    /// top or front.
    Peek,
    Visit,
    Found,
    NotFound,
    Empty,
    Duplicate,
    Display,
}

/// BST arena node as stored and snapshotted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeNode {
    pub id: usize,
    pub value: i64,
    pub left: Option<usize>,
    pub right: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureStep {
    pub kind: StructureStepKind,
    /// Position of the operation in the script.
    pub op_index: usize,
    pub operation: String,
    pub value: Option<i64>,
    /// Array index, stack/queue position or arena node id.
    pub index: Option<usize>,
    /// Contents after the step: bottom to top, front to back, head to tail,
    /// or in-order for the tree.
    pub contents: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<TreeNode>>,
    pub description: String,
}

impl Describe for StructureStep {
    fn kind(&self) -> &'static str {
        match self.kind {
            StructureStepKind::Insert => "insert",
            StructureStepKind::Remove => "remove",
            StructureStepKind::Peek => "peek",
            StructureStepKind::Visit => "visit",
            StructureStepKind::Found => "found",
            StructureStepKind::NotFound => "not_found",
            StructureStepKind::Empty => "empty",
            StructureStepKind::Duplicate => "duplicate",
            StructureStepKind::Display => "display",
        }
    }
    fn description(&self) -> &str {
        &self.description
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureOutcome {
    /// One line per operation, e.g. `Popped: 7` or `Stack is empty`.
    pub results: Vec<String>,
    pub contents: Vec<i64>,
    pub size: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tree: Option<Vec<TreeNode>>,
}

impl Summary for StructureOutcome {
    fn summary(&self) -> Vec<(&'static str, String)> {
        vec![
            ("results", self.results.join("; ")),
            ("contents", join(&self.contents)),
            ("size", self.size.to_string()),
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Structure {
    kind: StructureKind,
    script: Vec<Command>,
}

impl Structure {
    /// Validate every operation against `kind` up front.
    pub fn new(kind: StructureKind, operations: &[Operation]) -> Result<Self, InputError> {
        let script = operations
            .iter()
            .map(|op| command(kind, op))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { kind, script })
    }
}

#[derive(Debug, Clone, Copy)]
struct ListNode {
    value: i64,
    next: Option<usize>,
}

#[derive(Debug, Default)]
struct ArenaList {
    nodes: Vec<ListNode>,
    head: Option<usize>,
}

impl ArenaList {
    fn push_front(&mut self, value: i64) -> usize {
        let id = self.nodes.len();
        self.nodes.push(ListNode {
            value,
            next: self.head,
        });
        self.head = Some(id);
        id
    }

    fn unlink(&mut self, prev: Option<usize>, id: usize) {
        let next = self.nodes[id].next;
        match prev {
            Some(p) => self.nodes[p].next = next,
            None => self.head = next,
        }
    }

    fn values(&self) -> Vec<i64> {
        let mut out = Vec::new();
        let mut cur = self.head;
        while let Some(id) = cur {
            out.push(self.nodes[id].value);
            cur = self.nodes[id].next;
        }
        out
    }
}

#[derive(Debug, Default)]
struct ArenaBst {
    nodes: Vec<TreeNode>,
}

impl ArenaBst {
    fn root(&self) -> Option<usize> {
        (!self.nodes.is_empty()).then_some(0)
    }

    fn inorder(&self) -> Vec<usize> {
        let mut out = Vec::with_capacity(self.nodes.len());
        let mut stack = Vec::new();
        let mut cur = self.root();
        while cur.is_some() || !stack.is_empty() {
            while let Some(id) = cur {
                stack.push(id);
                cur = self.nodes[id].left;
            }
            if let Some(id) = stack.pop() {
                out.push(id);
                cur = self.nodes[id].right;
            }
        }
        out
    }

    fn values(&self) -> Vec<i64> {
        self.inorder().into_iter().map(|id| self.nodes[id].value).collect()
    }

    /// Append a leaf under `parent` (`true` = left side).
    fn attach(&mut self, value: i64, parent: Option<(usize, bool)>) -> usize {
        let id = self.nodes.len();
        self.nodes.push(TreeNode {
            id,
            value,
            left: None,
            right: None,
        });
        match parent {
            Some((p, true)) => self.nodes[p].left = Some(id),
            Some((p, false)) => self.nodes[p].right = Some(id),
            None => {}
        }
        id
    }
}

type Snapshot = (Vec<i64>, Option<Vec<TreeNode>>);

fn flat(values: &[i64]) -> Snapshot {
    (values.to_vec(), None)
}

fn queue_snapshot(q: &VecDeque<i64>) -> Snapshot {
    (q.iter().copied().collect(), None)
}

fn list_snapshot(l: &ArenaList) -> Snapshot {
    (l.values(), None)
}

fn tree_snapshot(t: &ArenaBst) -> Snapshot {
    (t.values(), Some(t.nodes.clone()))
}

struct Script<'a, S> {
    sink: &'a mut S,
    op: usize,
    label: String,
}

impl<S: StepSink<StructureStep>> Script<'_, S> {
    fn record<C, D>(
        &mut self,
        kind: StructureStepKind,
        value: Option<i64>,
        index: Option<usize>,
        snapshot: C,
        describe: D,
    ) where
        C: FnOnce() -> Snapshot,
        D: FnOnce() -> String,
    {
        let (op_index, operation) = (self.op, &self.label);
        self.sink.record_with(|| {
            let (contents, tree) = snapshot();
            StructureStep {
                kind,
                op_index,
                operation: operation.clone(),
                value,
                index,
                contents,
                tree,
                description: describe(),
            }
        });
    }

    fn empty(&mut self, what: &str) -> String {
        let line = format!("{what} is empty");
        let shown = line.clone();
        self.record(StructureStepKind::Empty, None, None, || flat(&[]), || shown);
        line
    }

    fn stack(&mut self, st: &mut Vec<i64>, cmd: Command) -> String {
        match cmd {
            Command::Push(v) => {
                st.push(v);
                let at = st.len() - 1;
                self.record(
                    StructureStepKind::Insert,
                    Some(v),
                    Some(at),
                    || flat(st),
                    || format!("Push {v} onto the stack"),
                );
                format!("Pushed: {v}")
            }
            Command::Pop => match st.pop() {
                Some(v) => {
                    let at = st.len();
                    self.record(
                        StructureStepKind::Remove,
                        Some(v),
                        Some(at),
                        || flat(st),
                        || format!("Pop {v} off the top"),
                    );
                    format!("Popped: {v}")
                }
                None => self.empty("Stack"),
            },
            Command::Top => match st.last().copied() {
                Some(v) => {
                    let at = st.len() - 1;
                    self.record(
                        StructureStepKind::Peek,
                        Some(v),
                        Some(at),
                        || flat(st),
                        || format!("Top of the stack is {v}"),
                    );
                    format!("Top: {v}")
                }
                None => self.empty("Stack"),
            },
            other => format!("Unsupported: {other}"),
        }
    }

    fn queue(&mut self, q: &mut VecDeque<i64>, cmd: Command) -> String {
        match cmd {
            Command::Enqueue(v) => {
                q.push_back(v);
                let at = q.len() - 1;
                self.record(
                    StructureStepKind::Insert,
                    Some(v),
                    Some(at),
                    || queue_snapshot(q),
                    || format!("Enqueue {v} at the back"),
                );
                format!("Enqueued: {v}")
            }
            Command::Dequeue => match q.pop_front() {
                Some(v) => {
                    self.record(
                        StructureStepKind::Remove,
                        Some(v),
                        Some(0),
                        || queue_snapshot(q),
                        || format!("Dequeue {v} from the front"),
                    );
                    format!("Dequeued: {v}")
                }
                None => self.empty("Queue"),
            },
            Command::Front => match q.front().copied() {
                Some(v) => {
                    self.record(
                        StructureStepKind::Peek,
                        Some(v),
                        Some(0),
                        || queue_snapshot(q),
                        || format!("Front of the queue is {v}"),
                    );
                    format!("Front: {v}")
                }
                None => self.empty("Queue"),
            },
            other => format!("Unsupported: {other}"),
        }
    }

    fn array(&mut self, a: &mut Vec<i64>, cmd: Command) -> String {
        match cmd {
            Command::Insert(v) => {
                a.push(v);
                let at = a.len() - 1;
                self.record(
                    StructureStepKind::Insert,
                    Some(v),
                    Some(at),
                    || flat(a),
                    || format!("Append {v} at index {at}"),
                );
                format!("Inserted: {v}")
            }
            Command::Delete(index) => {
                let len = a.len();
                match usize::try_from(index).ok().filter(|&i| i < len) {
                    Some(i) => {
                        let v = a.remove(i);
                        self.record(
                            StructureStepKind::Remove,
                            Some(v),
                            Some(i),
                            || flat(a),
                            || format!("Remove {v} from index {i}, shifting the tail left"),
                        );
                        format!("Deleted: {v} at index {i}")
                    }
                    None => {
                        self.record(
                            StructureStepKind::NotFound,
                            None,
                            None,
                            || flat(a),
                            || format!("Index {index} is outside 0..{len}"),
                        );
                        "Invalid index".to_string()
                    }
                }
            }
            Command::Search(v) => {
                for (i, &x) in a.iter().enumerate() {
                    self.record(
                        StructureStepKind::Visit,
                        Some(x),
                        Some(i),
                        || flat(a),
                        || format!("Compare a[{i}] = {x} with {v}"),
                    );
                    if x == v {
                        self.record(
                            StructureStepKind::Found,
                            Some(v),
                            Some(i),
                            || flat(a),
                            || format!("Found {v} at index {i}"),
                        );
                        return format!("Found {v} at index {i}");
                    }
                }
                self.record(
                    StructureStepKind::NotFound,
                    Some(v),
                    None,
                    || flat(a),
                    || format!("{v} is not in the array"),
                );
                format!("{v} not found")
            }
            Command::Display => {
                self.record(
                    StructureStepKind::Display,
                    None,
                    None,
                    || flat(a),
                    || "Show the array".to_string(),
                );
                format!("Array: {}", join(a))
            }
            other => format!("Unsupported: {other}"),
        }
    }

    fn list(&mut self, l: &mut ArenaList, cmd: Command) -> String {
        match cmd {
            Command::Insert(v) => {
                let id = l.push_front(v);
                self.record(
                    StructureStepKind::Insert,
                    Some(v),
                    Some(id),
                    || list_snapshot(l),
                    || format!("New node #{id} holding {v} becomes the head"),
                );
                format!("Inserted: {v}")
            }
            Command::Search(v) | Command::Delete(v) => {
                let deleting = matches!(cmd, Command::Delete(_));
                let (mut prev, mut cur) = (None, l.head);
                while let Some(id) = cur {
                    let node = l.nodes[id];
                    self.record(
                        StructureStepKind::Visit,
                        Some(node.value),
                        Some(id),
                        || list_snapshot(l),
                        || format!("Node #{id} holds {}", node.value),
                    );
                    if node.value == v && deleting {
                        l.unlink(prev, id);
                        self.record(
                            StructureStepKind::Remove,
                            Some(v),
                            Some(id),
                            || list_snapshot(l),
                            || format!("Unlink node #{id} holding {v}"),
                        );
                        return format!("Deleted: {v}");
                    }
                    if node.value == v {
                        self.record(
                            StructureStepKind::Found,
                            Some(v),
                            Some(id),
                            || list_snapshot(l),
                            || format!("Found {v} in node #{id}"),
                        );
                        return format!("Found: {v}");
                    }
                    prev = Some(id);
                    cur = node.next;
                }
                self.record(
                    StructureStepKind::NotFound,
                    Some(v),
                    None,
                    || list_snapshot(l),
                    || format!("Reached the tail without finding {v}"),
                );
                format!("{v} not found")
            }
            Command::Display => {
                self.record(
                    StructureStepKind::Display,
                    None,
                    l.head,
                    || list_snapshot(l),
                    || "Walk the list from the head".to_string(),
                );
                format!("List: {}", join(&l.values()))
            }
            other => format!("Unsupported: {other}"),
        }
    }

    fn bst(&mut self, t: &mut ArenaBst, cmd: Command) -> String {
        match cmd {
            Command::Insert(v) | Command::Search(v) => {
                let inserting = matches!(cmd, Command::Insert(_));
                let mut parent: Option<(usize, bool)> = None;
                let mut cur = t.root();
                while let Some(id) = cur {
                    let node = t.nodes[id];
                    self.record(
                        StructureStepKind::Visit,
                        Some(node.value),
                        Some(id),
                        || tree_snapshot(t),
                        || format!("Compare {v} with node #{id} ({})", node.value),
                    );
                    match v.cmp(&node.value) {
                        Ordering::Less => {
                            parent = Some((id, true));
                            cur = node.left;
                        }
                        Ordering::Greater => {
                            parent = Some((id, false));
                            cur = node.right;
                        }
                        Ordering::Equal if inserting => {
                            self.record(
                                StructureStepKind::Duplicate,
                                Some(v),
                                Some(id),
                                || tree_snapshot(t),
                                || format!("{v} is already in the tree"),
                            );
                            return format!("Duplicate: {v}");
                        }
                        Ordering::Equal => {
                            self.record(
                                StructureStepKind::Found,
                                Some(v),
                                Some(id),
                                || tree_snapshot(t),
                                || format!("Found {v} at node #{id}"),
                            );
                            return format!("Found: {v}");
                        }
                    }
                }
                if !inserting {
                    self.record(
                        StructureStepKind::NotFound,
                        Some(v),
                        None,
                        || tree_snapshot(t),
                        || format!("Fell off the tree looking for {v}"),
                    );
                    return format!("{v} not found");
                }
                let id = t.attach(v, parent);
                self.record(
                    StructureStepKind::Insert,
                    Some(v),
                    Some(id),
                    || tree_snapshot(t),
                    || match parent {
                        Some((p, true)) => format!("Attach {v} as the left child of node #{p}"),
                        Some((p, false)) => format!("Attach {v} as the right child of node #{p}"),
                        None => format!("{v} becomes the root"),
                    },
                );
                format!("Inserted: {v}")
            }
            Command::Display => {
                for id in t.inorder() {
                    let value = t.nodes[id].value;
                    self.record(
                        StructureStepKind::Visit,
                        Some(value),
                        Some(id),
                        || tree_snapshot(t),
                        || format!("In-order visit of node #{id} ({value})"),
                    );
                }
                self.record(
                    StructureStepKind::Display,
                    None,
                    t.root(),
                    || tree_snapshot(t),
                    || "In-order traversal complete".to_string(),
                );
                format!("Inorder: {}", join(&t.values()))
            }
            other => format!("Unsupported: {other}"),
        }
    }
}

enum State {
    Stack(Vec<i64>),
    Queue(VecDeque<i64>),
    Array(Vec<i64>),
    List(ArenaList),
    Bst(ArenaBst),
}

impl TracedAlgorithm for Structure {
    type Step = StructureStep;
    type Outcome = StructureOutcome;

    fn name(&self) -> &'static str {
        self.kind.name()
    }

    fn execute<S: StepSink<StructureStep>>(&self, sink: &mut S) -> StructureOutcome {
        let mut state = match self.kind {
            StructureKind::Stack => State::Stack(Vec::new()),
            StructureKind::Queue => State::Queue(VecDeque::new()),
            StructureKind::Array => State::Array(Vec::new()),
            StructureKind::LinkedList => State::List(ArenaList::default()),
            StructureKind::Bst => State::Bst(ArenaBst::default()),
        };
        let mut script = Script {
            sink,
            op: 0,
            label: String::new(),
        };
        let mut results = Vec::with_capacity(self.script.len());
        for (i, &cmd) in self.script.iter().enumerate() {
            script.op = i;
            script.label = cmd.to_string();
            let line = match &mut state {
                State::Stack(st) => script.stack(st, cmd),
                State::Queue(q) => script.queue(q, cmd),
                State::Array(a) => script.array(a, cmd),
                State::List(l) => script.list(l, cmd),
                State::Bst(t) => script.bst(t, cmd),
            };
            results.push(line);
        }

        let (contents, tree) = match state {
            State::Stack(st) | State::Array(st) => (st, None),
            State::Queue(q) => (q.into_iter().collect(), None),
            State::List(l) => (l.values(), None),
            State::Bst(t) => (t.values(), Some(t.nodes)),
        };
        StructureOutcome {
            results,
            size: contents.len(),
            contents,
            tree,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::operations;
    use crate::Executor;

    fn run(kind: StructureKind, script: &str) -> StructureOutcome {
        let ops = operations(script).unwrap();
        Executor::new(Structure::new(kind, &ops).unwrap()).run()
    }

    #[test]
    fn stack_is_lifo() {
        let out = run(StructureKind::Stack, "push,5;push,7;pop;top;pop;pop");
        assert_eq!(
            out.results,
            vec!["Pushed: 5", "Pushed: 7", "Popped: 7", "Top: 5", "Popped: 5", "Stack is empty"]
        );
        assert_eq!(out.size, 0);
    }

    #[test]
    fn queue_is_fifo() {
        let out = run(
            StructureKind::Queue,
            "enqueue,1;enqueue,2;dequeue;front;enqueue,3",
        );
        assert_eq!(out.results[2], "Dequeued: 1");
        assert_eq!(out.results[3], "Front: 2");
        assert_eq!(out.contents, vec![2, 3]);
    }

    #[test]
    fn array_deletes_by_index() {
        let out = run(
            StructureKind::Array,
            "insert,4;insert,8;insert,15;delete,1;delete,9;search,15;search,8;display",
        );
        assert_eq!(out.results[3], "Deleted: 8 at index 1");
        assert_eq!(out.results[4], "Invalid index");
        assert_eq!(out.results[5], "Found 15 at index 1");
        assert_eq!(out.results[6], "8 not found");
        assert_eq!(out.results[7], "Array: 4, 15");
    }

    #[test]
    fn linked_list_inserts_at_head() {
        let (out, trace) = Executor::new(
            Structure::new(
                StructureKind::LinkedList,
                &operations("insert,1;insert,2;insert,3;delete,2;delete,9;search,1").unwrap(),
            )
            .unwrap(),
        )
        .run_traced();
        assert_eq!(out.contents, vec![3, 1]);
        assert_eq!(out.results[3], "Deleted: 2");
        assert_eq!(out.results[4], "9 not found");
        assert_eq!(out.results[5], "Found: 1");
        let unlinked = trace
            .iter()
            .find(|s| s.kind == StructureStepKind::Remove)
            .unwrap();
        assert_eq!(unlinked.index, Some(1));
        assert_eq!(unlinked.contents, vec![3, 1]);
    }

    #[test]
    fn deleting_the_head_moves_it() {
        let out = run(StructureKind::LinkedList, "insert,1;insert,2;delete,2;insert,5");
        assert_eq!(out.contents, vec![5, 1]);
    }

    #[test]
    fn bst_keeps_inorder_sorted() {
        let (out, trace) = Executor::new(
            Structure::new(
                StructureKind::Bst,
                &operations(concat!(
                    "insert,50;insert,30;insert,70;insert,20;insert,40;",
                    "insert,30;search,40;search,65;display"
                ))
                .unwrap(),
            )
            .unwrap(),
        )
        .run_traced();
        assert_eq!(out.contents, vec![20, 30, 40, 50, 70]);
        assert_eq!(out.results[5], "Duplicate: 30");
        assert_eq!(out.results[6], "Found: 40");
        assert_eq!(out.results[7], "65 not found");
        assert_eq!(out.results[8], "Inorder: 20, 30, 40, 50, 70");

        let tree = out.tree.unwrap();
        assert_eq!(tree[0].left, Some(1));
        assert_eq!(tree[0].right, Some(2));
        assert_eq!(tree[1].right, Some(4));

        let search_path: Vec<i64> = trace
            .iter()
            .filter(|s| s.op_index == 6 && s.kind == StructureStepKind::Visit)
            .filter_map(|s| s.value)
            .collect();
        assert_eq!(search_path, vec![50, 30, 40]);
    }

    #[test]
    fn scripts_are_validated() {
        let reject = |kind, script| Structure::new(kind, &operations(script).unwrap()).is_err();
        assert!(reject(StructureKind::Stack, "insert,1"));
        assert!(reject(StructureKind::Stack, "push"));
        assert!(reject(StructureKind::Queue, "dequeue,3"));
        assert!(reject(StructureKind::Bst, "delete,3"));
        assert!(!reject(StructureKind::Array, ""));
    }

    #[test]
    fn silent_and_traced_agree() {
        for kind in StructureKind::ALL {
            let script = match kind {
                StructureKind::Stack => "push,1;push,2;pop",
                StructureKind::Queue => "enqueue,1;dequeue;dequeue",
                _ => "insert,3;insert,1;search,1;display",
            };
            let ops = operations(script).unwrap();
            let engine = Executor::new(Structure::new(kind, &ops).unwrap());
            let (traced, trace) = engine.run_traced();
            assert_eq!(engine.run(), traced);
            assert!(trace.iter().all(|s| s.op_index < 4));
        }
    }
}
