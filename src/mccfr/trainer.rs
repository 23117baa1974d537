use super::key::InfosetKey;
use crate::Position;
use crate::Probability;
use crate::Utility;
use crate::cards::Street;
use crate::context::TrainingContext;
use crate::gameplay::Node;
use rand::Rng;
use rand::SeedableRng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::SmallRng;

/// One worker's walker over the game tree.
///
/// The tree itself is never stored. Each traversal deals a fresh root
/// and rebuilds the nodes it visits; only the infoset store outlives it.
pub struct Trainer<'a> {
    context: &'a TrainingContext,
    rng: SmallRng,
    nodes: usize,
}

impl<'a> Trainer<'a> {
    pub fn new(context: &'a TrainingContext, seed: u64) -> Self {
        Self {
            context,
            rng: SmallRng::seed_from_u64(seed),
            nodes: 0,
        }
    }
    /// nodes visited since the last call
    pub fn take_nodes(&mut self) -> usize {
        std::mem::take(&mut self.nodes)
    }
    pub fn root(&self) -> Node {
        Node::root(self.context.rules())
    }

    /// One iteration: a traversal for every seat. Past the warmup most
    /// traversals prune hopeless actions; a few still explore everything.
    pub fn iterate(&mut self, t: usize) {
        let context = self.context;
        let schedule = context.schedule();
        for traverser in 0..context.rules().players {
            let prune = t > schedule.pruning_warmup
                && self.rng.random::<Probability>() >= schedule.pruning_explore;
            let ref root = self.root();
            self.traverse(root, traverser, prune);
        }
    }

    /// Expected value of `node` for `traverser` under the current
    /// regret-matching strategies, updating the traverser's regrets on
    /// the way back up.
    ///
    /// Every action of the traverser is explored; opponents and chance
    /// contribute one sampled action each. With `prune`, traverser actions
    /// whose regret sits below the pruning threshold are skipped, except
    /// on the river.
    pub fn traverse(&mut self, node: &Node, traverser: Position, prune: bool) -> Utility {
        self.nodes += 1;
        let state = node.state();
        match node {
            Node::Terminal(state) => state.settle(self.context.evaluator())[traverser] as Utility,
            _ if !state.seat(traverser).is_alive() => -state.seat(traverser).spent() as Utility,
            Node::Chance(state) => {
                let ref child = state.deal(&mut self.rng);
                self.traverse(child, traverser, prune)
            }
            Node::Play(state) if state.to_move() == traverser => {
                let context = self.context;
                let schedule = context.schedule();
                let actions = state.legal();
                let ref key = InfosetKey::new(state, context.encoder());
                let infoset = context.store().obtain(key, actions.len());
                let strategy = infoset.strategy();
                let skip = prune && !state.street().is_last();
                let mut values = vec![None; actions.len()];
                let mut expected = 0.;
                for (i, action) in actions.iter().enumerate() {
                    if skip && infoset.regret(i) < schedule.pruning_threshold {
                        continue;
                    }
                    let ref child = state.apply(*action);
                    let value = self.traverse(child, traverser, prune);
                    expected += strategy[i] * value;
                    values[i] = Some(value);
                }
                for (i, value) in values.into_iter().enumerate() {
                    if let Some(value) = value {
                        infoset.add_regret(i, value - expected, schedule.regret_floor);
                    }
                }
                expected
            }
            Node::Play(state) => {
                let actions = state.legal();
                let ref key = InfosetKey::new(state, self.context.encoder());
                let infoset = self.context.store().obtain(key, actions.len());
                let i = self.sample(&infoset.strategy());
                let ref child = state.apply(actions[i]);
                self.traverse(child, traverser, prune)
            }
        }
    }

    /// Accumulates the average strategy over the first betting round.
    ///
    /// At the traverser's decisions one action is sampled from the
    /// current strategy and its visit count incremented; every action of
    /// the other seats is followed so that all their preflop infosets are
    /// reached.
    pub fn update_strategy(&mut self, node: &Node, traverser: Position) {
        let state = node.state();
        match node {
            Node::Terminal(_) => {}
            _ if !state.seat(traverser).is_alive() => {}
            _ if state.street() != Street::Pref => {}
            Node::Chance(state) => {
                let ref child = state.deal(&mut self.rng);
                self.update_strategy(child, traverser);
            }
            Node::Play(state) if state.to_move() == traverser => {
                let actions = state.legal();
                let ref key = InfosetKey::new(state, self.context.encoder());
                let infoset = self.context.store().obtain(key, actions.len());
                let i = self.sample(&infoset.strategy());
                infoset.visit(i);
                let ref child = state.apply(actions[i]);
                self.update_strategy(child, traverser);
            }
            Node::Play(state) => {
                for action in state.legal() {
                    let ref child = state.apply(action);
                    self.update_strategy(child, traverser);
                }
            }
        }
    }

    fn sample(&mut self, strategy: &[Probability]) -> usize {
        WeightedIndex::new(strategy)
            .expect("strategy is a distribution")
            .sample(&mut self.rng)
    }
}
