use std::time::Instant;

use rustc_hash::FxHashMap;

use pentago::prelude::*;

use super::{
    policy, retain_reachable, DEFAULT_SIMULATIONS, REPORT_EVERY_SIMS_UNBOUNDED, REPORT_FRACTION,
};

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PUCTConfig {
    /// Exploration constant of the PUCT formula.
    pub exploration: f64,
    pub limits: Option<SearchLimits>,
    pub debug: bool,
}

impl Default for PUCTConfig {
    fn default() -> Self {
        Self {
            exploration: 1.5,
            limits: None,
            debug: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeStats {
    pub visits: u32,
    pub value: f64,
}

impl EdgeStats {
    #[inline]
    pub fn mean(&self) -> f64 {
        if self.visits == 0 {
            0.0
        } else {
            self.value / self.visits as f64
        }
    }
}

/// A PUCT tree node: per-move priors instead of an untried-move list, with
/// edge statistics accumulated per (node, move) pair.
#[derive(Debug, Clone, Default)]
pub struct PuctNode {
    pub visits: u32,
    pub priors: Vec<(Move, f32)>,
    pub edges: FxHashMap<Move, EdgeStats>,
    pub children: FxHashMap<Move, PositionKey>,
}

impl PuctNode {
    fn new(priors: Vec<(Move, f32)>) -> Self {
        Self {
            priors,
            ..Default::default()
        }
    }
}

/// PUCT selection score for one edge.
pub fn puct_score(parent_visits: u32, prior: f32, edge: EdgeStats, exploration: f64) -> f64 {
    let sqrt_n = ((parent_visits + 1) as f64).sqrt();
    edge.mean() + exploration * prior as f64 * sqrt_n / (1 + edge.visits) as f64
}

/// MCTS variant with heuristic move priors in place of rollouts. Shares the
/// persistent-tree idea with the UCT engine; its backpropagation negates the
/// value at each ply, which the UCT engine's deliberately does not.
pub struct PUCT {
    pub config: PUCTConfig,
    pub(crate) tree: FxHashMap<PositionKey, PuctNode>,
    pub(crate) root: Option<PositionKey>,
    counter: SearchCounter,
    progress: Option<ProgressCallback>,
}

impl PUCT {
    pub fn new(config: PUCTConfig) -> Self {
        Self {
            config,
            tree: FxHashMap::default(),
            root: None,
            counter: SearchCounter::ZERO,
            progress: None,
        }
    }

    /// Discards the whole tree; call at the start of a new game.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.root = None;
    }

    /// Marks a new root, optionally discarding everything unreachable from it.
    pub fn rebase(&mut self, board: &Board, to_move: Player, prune: bool) {
        let key = board.position_key(to_move);
        self.tree
            .entry(key)
            .or_insert_with(|| PuctNode::new(policy::heuristic_priors(board)));
        self.root = Some(key);
        if prune {
            retain_reachable(&mut self.tree, key, |node, buffer| {
                buffer.extend(node.children.values().copied())
            });
        }
    }

    pub fn node_count(&self) -> usize {
        self.tree.len()
    }

    /// Key of the current root position, if any search or rebase happened.
    pub fn root(&self) -> Option<PositionKey> {
        self.root
    }

    pub fn counter(&self) -> SearchCounter {
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = SearchCounter::ZERO;
    }

    pub fn set_progress_callback(&mut self, callback: Option<ProgressCallback>) {
        self.progress = callback;
    }

    /// One iteration: descend by PUCT score, creating at most one new node,
    /// then back up the leaf value with alternating sign.
    fn simulate_once(
        &mut self,
        root_key: PositionKey,
        board: &Board,
        root_player: Player,
        counter: &mut SearchCounter,
    ) {
        let mut path: Vec<(PositionKey, Move)> = Vec::with_capacity(8);
        let mut cur_board = *board;
        let mut cur_player = root_player;
        let mut key = root_key;

        // Value relative to the mover at the deepest edge of the path.
        let leaf = loop {
            let node = self.tree.get(&key).expect("path node must exist");
            if node.priors.is_empty() {
                // No legal moves: a full board, worth a draw.
                break 0.0;
            }
            let parent_visits = node.visits;
            let mut best: Option<(f64, Move)> = None;
            for &(mv, prior) in &node.priors {
                let edge = node.edges.get(&mv).copied().unwrap_or_default();
                let score = puct_score(parent_visits, prior, edge, self.config.exploration);
                if best.map_or(true, |(b, _)| score > b) {
                    best = Some((score, mv));
                }
            }
            let (_, mv) = best.expect("priors are non-empty");
            path.push((key, mv));
            let (next, outcome) = apply(&cur_board, cur_player, mv).expect("prior move is legal");
            counter.states_visited += 1;
            match outcome {
                MoveOutcome::Won(winner) => break if winner == cur_player { 1.0 } else { -1.0 },
                MoveOutcome::Draw => break 0.0,
                MoveOutcome::Ongoing => {}
            }
            let next_player = cur_player.opposite();
            let child_key = next.position_key(next_player);
            self.tree
                .get_mut(&key)
                .expect("path node must exist")
                .children
                .insert(mv, child_key);
            if !self.tree.contains_key(&child_key) {
                // Expansion: evaluate the new leaf with the prior heuristic
                // instead of rolling out, from the expanding mover's view.
                self.tree
                    .insert(child_key, PuctNode::new(policy::heuristic_priors(&next)));
                counter.evals += 1;
                break policy::leaf_value(&next, cur_player);
            }
            cur_board = next;
            cur_player = next_player;
            key = child_key;
        };

        self.backpropagate(&path, leaf);
    }

    /// Adversarial backup: the value is negated at every ply walking back to
    /// the root, unlike the UCT engine's constant-sign rule.
    pub(crate) fn backpropagate(&mut self, path: &[(PositionKey, Move)], leaf: f64) {
        let mut value = leaf;
        for (key, mv) in path.iter().rev() {
            let node = self.tree.get_mut(key).expect("path node must exist");
            node.visits += 1;
            let edge = node.edges.entry(*mv).or_default();
            edge.visits += 1;
            edge.value += value;
            value = -value;
        }
    }

    /// The most-visited root edge; the first prior breaks an all-zero tie.
    fn most_visited(&self, root_key: PositionKey, board: &Board) -> Move {
        let root = self.tree.get(&root_key).expect("root node must exist");
        let mut best: Option<(Move, u32)> = None;
        for &(mv, _) in &root.priors {
            let visits = root.edges.get(&mv).map_or(0, |edge| edge.visits);
            if best.map_or(true, |(_, b)| visits > b) {
                best = Some((mv, visits));
            }
        }
        match best {
            Some((mv, _)) => mv,
            None => legal_moves(board)[0],
        }
    }
}

impl GameTreeSearch for PUCT {
    fn search(&mut self, board: &Board, to_move: Player) -> Result<SearchResult, PentagoError> {
        if board.is_terminal_position() {
            return Err(PentagoError::IllegalState);
        }
        let start_time = Instant::now();
        let root_key = board.position_key(to_move);
        self.tree
            .entry(root_key)
            .or_insert_with(|| PuctNode::new(policy::heuristic_priors(board)));
        self.root = Some(root_key);

        let limits = self.config.limits.unwrap_or_default();
        let sims_target = limits.max_simulations.unwrap_or(if limits.max_time_ms.is_some() {
            u64::MAX
        } else {
            DEFAULT_SIMULATIONS
        });
        let report_every = if sims_target == u64::MAX {
            REPORT_EVERY_SIMS_UNBOUNDED
        } else {
            (sims_target / REPORT_FRACTION).max(1)
        };

        let mut counter = SearchCounter::ZERO;
        let mut simulations = 0u64;
        let mut last_print = start_time;
        while simulations < sims_target {
            if let Some(max_time_ms) = limits.max_time_ms {
                if start_time.elapsed().as_millis() >= max_time_ms {
                    break;
                }
            }
            if let Some(max_positions) = limits.max_positions {
                if counter.states_visited >= max_positions {
                    break;
                }
            }
            simulations += 1;
            self.simulate_once(root_key, board, to_move, &mut counter);
            if simulations % report_every == 0 {
                report_progress(
                    &mut self.progress,
                    SearchProgress {
                        elapsed_ms: start_time.elapsed().as_millis(),
                        states_visited: counter.states_visited,
                        simulations,
                        depth: 0,
                    },
                );
            }
            if self.config.debug && last_print.elapsed().as_millis() >= 500 {
                last_print = Instant::now();
                println!(
                    "  sims={simulations:8} nodes={:8} {}",
                    self.tree.len(),
                    counter.summary(start_time.elapsed().as_nanos())
                );
            }
        }

        let best = self.most_visited(root_key, board);
        self.counter.add_in_place(&counter);
        Ok(SearchResult::new(best, 0, counter))
    }
}
