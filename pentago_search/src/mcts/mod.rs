use std::time::Instant;

use rustc_hash::{FxHashMap, FxHashSet};

use pentago::prelude::*;
use pentago::rand::{rngs::SmallRng, Rng, SeedableRng};

pub mod policy;

pub mod puct;

/// Simulations to run when neither a time limit nor a simulation cap is set.
pub(crate) const DEFAULT_SIMULATIONS: u64 = 10_000;

/// Fraction of the simulation budget between two progress reports.
pub(crate) const REPORT_FRACTION: u64 = 100;

/// Reports to emit per budget when only a time limit bounds the search.
pub(crate) const REPORT_EVERY_SIMS_UNBOUNDED: u64 = 200;

#[derive(Debug, Copy, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MCTSConfig {
    /// Exploration constant of the UCT formula.
    pub exploration: f64,
    /// Maximum plies per rollout before falling back to the static
    /// evaluation's sign.
    pub rollout_cutoff: u32,
    pub limits: Option<SearchLimits>,
    pub debug: bool,
}

impl Default for MCTSConfig {
    fn default() -> Self {
        Self {
            exploration: std::f64::consts::SQRT_2,
            rollout_cutoff: 256,
            limits: None,
            debug: false,
        }
    }
}

/// A search tree node, keyed externally by position key. Child links are
/// position keys so that transposed lines share subtrees.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub visits: u32,
    pub value: f64,
    pub untried: Vec<Move>,
    pub children: FxHashMap<Move, PositionKey>,
}

impl Node {
    fn new(untried: Vec<Move>) -> Self {
        Self {
            untried,
            ..Default::default()
        }
    }

    #[inline]
    pub fn mean(&self) -> f64 {
        self.value / self.visits as f64
    }
}

/// UCT selection score; a never-visited child must always be selected first.
pub fn uct_score(parent_visits: u32, child_value: f64, child_visits: u32, exploration: f64) -> f64 {
    if child_visits == 0 {
        return f64::INFINITY;
    }
    let mean = child_value / child_visits as f64;
    mean + exploration * (((parent_visits as f64) + 1.0).ln() / child_visits as f64).sqrt()
}

/// Discards every tree node unreachable from `root` through recorded child
/// links. Shared by the UCT and PUCT engines.
pub(crate) fn retain_reachable<N>(
    tree: &mut FxHashMap<PositionKey, N>,
    root: PositionKey,
    push_children: impl Fn(&N, &mut Vec<PositionKey>),
) {
    let mut reachable = FxHashSet::default();
    let mut stack = vec![root];
    let mut buffer = Vec::new();
    reachable.insert(root);
    while let Some(key) = stack.pop() {
        let Some(node) = tree.get(&key) else { continue };
        push_children(node, &mut buffer);
        for child in buffer.drain(..) {
            if reachable.insert(child) {
                stack.push(child);
            }
        }
    }
    tree.retain(|key, _| reachable.contains(key));
}

/// Monte-Carlo tree search with UCT selection and a persistent, rebaseable
/// tree. The tree is owned by the engine instance and is not thread-safe;
/// concurrent games each need their own engine.
pub struct MCTS {
    pub config: MCTSConfig,
    pub(crate) tree: FxHashMap<PositionKey, Node>,
    pub(crate) root: Option<PositionKey>,
    counter: SearchCounter,
    progress: Option<ProgressCallback>,
    rng: SmallRng,
}

impl MCTS {
    pub fn new(config: MCTSConfig) -> Self {
        Self::with_rng(config, SmallRng::from_entropy())
    }

    /// Deterministic engine for reproducible runs.
    pub fn with_seed(config: MCTSConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: MCTSConfig, rng: SmallRng) -> Self {
        Self {
            config,
            tree: FxHashMap::default(),
            root: None,
            counter: SearchCounter::ZERO,
            progress: None,
            rng,
        }
    }

    /// Discards the whole tree; call at the start of a new game.
    pub fn reset(&mut self) {
        self.tree.clear();
        self.root = None;
    }

    /// Marks a new root for subsequent searches. With `prune`, every node
    /// unreachable from the new root is discarded, bounding memory growth
    /// across a game.
    pub fn rebase(&mut self, board: &Board, to_move: Player, prune: bool) {
        let key = board.position_key(to_move);
        self.tree
            .entry(key)
            .or_insert_with(|| Node::new(legal_moves(board)));
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

    /// Cumulative statistics across searches.
    pub fn counter(&self) -> SearchCounter {
        self.counter
    }

    pub fn reset_counter(&mut self) {
        self.counter = SearchCounter::ZERO;
    }

    pub fn set_progress_callback(&mut self, callback: Option<ProgressCallback>) {
        self.progress = callback;
    }

    /// One iteration: select to a frontier node, expand one untried move,
    /// roll out, then backpropagate along the traversed path.
    fn simulate_once(
        &mut self,
        root_key: PositionKey,
        board: &Board,
        root_player: Player,
        counter: &mut SearchCounter,
    ) {
        let mut path = vec![root_key];
        let mut cur_board = *board;
        let mut cur_player = root_player;
        let mut key = root_key;
        // None while the walk is still in play; Some(None) is a draw.
        let mut terminal: Option<Option<Player>> = None;

        // Selection: descend while the node is fully expanded.
        loop {
            let node = self.tree.get(&key).expect("path node must exist");
            if !node.untried.is_empty() || node.children.is_empty() {
                break;
            }
            let parent_visits = node.visits;
            let mut best: Option<(f64, Move, PositionKey)> = None;
            for (&mv, &child_key) in &node.children {
                let child = self.tree.get(&child_key).expect("child node must exist");
                let score = uct_score(parent_visits, child.value, child.visits, self.config.exploration);
                if best.map_or(true, |(b, _, _)| score > b) {
                    best = Some((score, mv, child_key));
                }
            }
            let (_, mv, child_key) = best.expect("children are non-empty");
            let (next, outcome) = apply(&cur_board, cur_player, mv).expect("recorded move is legal");
            counter.states_visited += 1;
            cur_board = next;
            path.push(child_key);
            match outcome {
                MoveOutcome::Won(winner) => {
                    terminal = Some(Some(winner));
                    break;
                }
                MoveOutcome::Draw => {
                    terminal = Some(None);
                    break;
                }
                MoveOutcome::Ongoing => {
                    cur_player = cur_player.opposite();
                    key = child_key;
                }
            }
        }

        // Expansion: try one untried move, chosen uniformly at random.
        if terminal.is_none() {
            let node = self.tree.get_mut(&key).expect("path node must exist");
            if !node.untried.is_empty() {
                let index = self.rng.gen_range(0..node.untried.len());
                let mv = node.untried.swap_remove(index);
                let (next, outcome) = apply(&cur_board, cur_player, mv).expect("untried move is legal");
                counter.states_visited += 1;
                let next_player = cur_player.opposite();
                let child_key = next.position_key(next_player);
                let untried = if outcome.is_terminal() {
                    Vec::new()
                } else {
                    legal_moves(&next)
                };
                let node = self.tree.get_mut(&key).expect("path node must exist");
                node.children.insert(mv, child_key);
                self.tree.entry(child_key).or_insert_with(|| Node::new(untried));
                path.push(child_key);
                cur_board = next;
                cur_player = next_player;
                match outcome {
                    MoveOutcome::Won(winner) => terminal = Some(Some(winner)),
                    MoveOutcome::Draw => terminal = Some(None),
                    MoveOutcome::Ongoing => {}
                }
            }
        }

        // Simulation: terminal positions score directly, otherwise roll out.
        let reward = match terminal {
            Some(Some(winner)) => {
                if winner == root_player {
                    1.0
                } else {
                    -1.0
                }
            }
            Some(None) => 0.0,
            None => {
                let rollout = policy::rollout(
                    &cur_board,
                    cur_player,
                    root_player,
                    self.config.rollout_cutoff,
                    &mut self.rng,
                );
                counter.states_visited += rollout.steps;
                if rollout.used_static_eval {
                    counter.evals += 1;
                }
                rollout.reward
            }
        };

        self.backpropagate(&path, reward);
    }

    /// Rewards are from the root mover's perspective and are applied with a
    /// constant sign along the whole path: rollouts already resolve relative
    /// to the root mover, so no per-ply negation happens here.
    pub(crate) fn backpropagate(&mut self, path: &[PositionKey], reward: f64) {
        for key in path {
            let node = self.tree.get_mut(key).expect("path node must exist");
            node.visits += 1;
            node.value += reward;
        }
    }

    /// The root move with the highest mean value among visited children;
    /// visit count breaks exact ties.
    fn best_by_mean(&self, root_key: PositionKey, board: &Board) -> Move {
        let root = self.tree.get(&root_key).expect("root node must exist");
        let mut best: Option<(Move, f64, u32)> = None;
        for (&mv, child_key) in &root.children {
            let Some(child) = self.tree.get(child_key) else {
                continue;
            };
            if child.visits == 0 {
                continue;
            }
            let mean = child.mean();
            let better = best.map_or(true, |(_, b_mean, b_visits)| {
                mean > b_mean || (mean == b_mean && child.visits > b_visits)
            });
            if better {
                best = Some((mv, mean, child.visits));
            }
        }
        match best {
            Some((mv, _, _)) => mv,
            None => legal_moves(board)[0],
        }
    }
}

impl GameTreeSearch for MCTS {
    fn search(&mut self, board: &Board, to_move: Player) -> Result<SearchResult, PentagoError> {
        if board.is_terminal_position() {
            return Err(PentagoError::IllegalState);
        }
        let start_time = Instant::now();
        let root_key = board.position_key(to_move);
        self.tree
            .entry(root_key)
            .or_insert_with(|| Node::new(legal_moves(board)));
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

        let best = self.best_by_mean(root_key, board);
        self.counter.add_in_place(&counter);
        Ok(SearchResult::new(best, 0, counter))
    }
}
