//! Decision tree traversal with deferred branches
//!
//! A [`Navigator`] holds a cursor into a built tree and two LIFO stacks of
//! deferred branches. Hedged answers ("probably", "probably not") go on the
//! probable stack, "unknown" answers on the unknown stack. When a guess is
//! rejected, [`Navigator::backtrack`] retries the most recent unknown
//! deferral first and only then the most recent probable one.

use super::builder::{DecisionTree, NodeId, TreeNode};
use super::truths::SessionTruths;
use crate::catalog::Catalog;
use crate::core::{Answer, DeferralKind, Direction};
use tracing::trace;

/// A branch taken on a hedged answer, to retry the other way later
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deferral {
    pub direction_taken: Direction,
    pub node: NodeId,
}

/// Coarse navigator state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigatorState {
    /// Cursor on a question with more than one candidate
    Active,
    /// Cursor on a leaf or a pool of at most one entry
    Decided,
    /// Cursor absent and nothing left to retry
    Exhausted,
}

/// Cursor plus backtrack stacks over one decision tree
pub struct Navigator<'a> {
    tree: &'a DecisionTree,
    catalog: &'a Catalog,
    cursor: Option<NodeId>,
    probable: Vec<Deferral>,
    unknown: Vec<Deferral>,
    truths: SessionTruths,
}

impl<'a> Navigator<'a> {
    /// Start at the root of `tree` with empty stacks and no recorded answers
    #[must_use]
    pub fn new(tree: &'a DecisionTree, catalog: &'a Catalog) -> Self {
        Self {
            tree,
            catalog,
            cursor: tree.root(),
            probable: Vec::new(),
            unknown: Vec::new(),
            truths: SessionTruths::new(),
        }
    }

    #[inline]
    #[must_use]
    pub const fn cursor(&self) -> Option<NodeId> {
        self.cursor
    }

    #[inline]
    #[must_use]
    pub const fn tree(&self) -> &'a DecisionTree {
        self.tree
    }

    #[inline]
    #[must_use]
    pub const fn truths(&self) -> &SessionTruths {
        &self.truths
    }

    fn current_node(&self) -> Option<&'a TreeNode> {
        let tree = self.tree;
        self.cursor.map(|id| tree.node(id))
    }

    /// Index of the question at the cursor, `None` at a leaf or when absent
    #[must_use]
    pub fn current_question_index(&self) -> Option<usize> {
        self.current_node().and_then(TreeNode::question)
    }

    /// Text of the question at the cursor
    #[must_use]
    pub fn current_question(&self) -> Option<&'a str> {
        let catalog = self.catalog;
        self.current_question_index()
            .map(|q| catalog.question(q).text())
    }

    /// Name of the first candidate at the cursor
    ///
    /// `None` means no entry matches the answers given on this path.
    #[must_use]
    pub fn current_guess(&self) -> Option<&'a str> {
        let catalog = self.catalog;
        self.candidates().first().map(|&e| catalog.entry(e).name())
    }

    /// Entry indices consistent with the path to the cursor
    #[must_use]
    pub fn candidates(&self) -> &'a [usize] {
        match self.current_node() {
            Some(node) => node.pool(),
            None => &[],
        }
    }

    #[inline]
    #[must_use]
    pub fn pool_size(&self) -> usize {
        self.candidates().len()
    }

    #[must_use]
    pub fn state(&self) -> NavigatorState {
        match self.current_node() {
            None if self.probable.is_empty() && self.unknown.is_empty() => {
                NavigatorState::Exhausted
            }
            Some(node) if !node.is_leaf() && node.pool().len() > 1 => NavigatorState::Active,
            _ => NavigatorState::Decided,
        }
    }

    /// Whether the cursor is ready for a guess (or has nothing to guess)
    #[inline]
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.state() != NavigatorState::Active
    }

    /// Deferrals pending on the given stack, oldest first
    #[must_use]
    pub fn deferrals(&self, kind: DeferralKind) -> &[Deferral] {
        match kind {
            DeferralKind::Probable => &self.probable,
            DeferralKind::Unknown => &self.unknown,
        }
    }

    /// Move to the child in `direction`
    ///
    /// Records nothing and skips nothing. A no-op when the cursor is absent.
    pub fn advance(&mut self, direction: Direction) {
        if let Some(node) = self.current_node() {
            self.cursor = node.child(direction);
        }
    }

    /// Answer the question at the cursor with a graded answer
    ///
    /// Records the answer, remembers the untaken branch for hedged answers,
    /// descends and then follows any questions already answered this session.
    /// A no-op when the cursor has no question.
    pub fn advance_graded(&mut self, answer: Answer) {
        let (Some(id), Some(question)) = (self.cursor, self.current_question_index()) else {
            return;
        };

        self.truths.record(question, answer.recorded());
        self.descend(id, answer);
        self.skip_answered();
    }

    /// Follow recorded answers until the pool is decided or an unanswered
    /// question is reached
    pub fn skip_answered(&mut self) {
        while self.pool_size() > 1 {
            let (Some(id), Some(question)) = (self.cursor, self.current_question_index()) else {
                break;
            };
            let Some(answer) = self.truths.get(question) else {
                break;
            };

            trace!(question, %answer, "following recorded answer");
            self.descend(id, answer);
        }
    }

    /// Retry the most recent deferred branch
    ///
    /// Unknown deferrals are popped before probable ones. Returns `false` and
    /// leaves the cursor absent when both stacks are empty.
    pub fn backtrack(&mut self) -> bool {
        let Some(deferral) = self.unknown.pop().or_else(|| self.probable.pop()) else {
            self.cursor = None;
            return false;
        };

        trace!(
            node = deferral.node.index(),
            taken = ?deferral.direction_taken,
            "backtracking"
        );

        self.cursor = self
            .tree
            .node(deferral.node)
            .child(deferral.direction_taken.opposite());
        self.skip_answered();
        true
    }

    /// Move the cursor back to the root
    ///
    /// Stacks and recorded answers are kept.
    pub fn reset(&mut self) {
        self.cursor = self.tree.root();
    }

    /// Start a fresh game on the same tree
    pub fn restart(&mut self) {
        self.reset();
        self.probable.clear();
        self.unknown.clear();
        self.truths.clear();
    }

    fn descend(&mut self, id: NodeId, answer: Answer) {
        let direction = answer.direction();

        if let Some(kind) = answer.deferral() {
            let deferral = Deferral {
                direction_taken: direction,
                node: id,
            };
            trace!(node = id.index(), ?kind, ?direction, "deferring branch");
            match kind {
                DeferralKind::Probable => self.probable.push(deferral),
                DeferralKind::Unknown => self.unknown.push(deferral),
            }
        }

        self.cursor = self.tree.node(id).child(direction);
    }
}
