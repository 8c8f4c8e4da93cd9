use std::time::Instant;

use sskp_core::{Bit, Fixing, Instance, Observer};

use crate::relaxation::{self, RelaxationPoint};

use super::{
    Action, BranchRule, Config, Event, Incumbent, Solution, Stats, Status, event::Prune,
    node::Node,
};

/// Whether the search loop should keep going after a node.
enum Step {
    Continue,
    Stop,
}

/// Mutable state of one depth-first search.
struct Search<'a, Obs> {
    instance: &'a Instance,
    root: &'a Fixing,
    config: &'a Config,
    observer: Obs,
    stack: Vec<Node>,
    incumbent: Option<Incumbent>,
    stats: Stats,
}

/// Runs the depth-first search from `root`.
pub(super) fn search<Obs>(
    instance: &Instance,
    root: &Fixing,
    config: &Config,
    observer: Obs,
) -> Solution
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    let start = Instant::now();
    let mut search = Search {
        instance,
        root,
        config,
        observer,
        stack: vec![Node::root()],
        incumbent: None,
        stats: Stats::default(),
    };

    let status = loop {
        let Some(node) = search.stack.pop() else {
            break Status::Optimal;
        };
        if start.elapsed() >= config.time_limit() {
            if config.logging() {
                tracing::info!(
                    "time limit of {:?} reached after {} nodes",
                    config.time_limit(),
                    search.stats.nodes
                );
            }
            break Status::TimeLimit;
        }
        if let Step::Stop = search.process(&node) {
            break Status::StoppedByObserver;
        }
    };

    search.stats.elapsed = start.elapsed();

    if config.logging() {
        tracing::info!(
            status = ?status,
            nodes = search.stats.nodes,
            objective = ?search.incumbent.as_ref().map(|incumbent| incumbent.objective),
            elapsed = ?search.stats.elapsed,
            "branch and bound finished"
        );
    }

    Solution {
        status,
        incumbent: search.incumbent,
        stats: search.stats,
    }
}

impl<Obs> Search<'_, Obs>
where
    Obs: for<'a> Observer<Event<'a>, Action>,
{
    fn process(&mut self, node: &Node) -> Step {
        self.stats.nodes += 1;
        self.stats.max_depth = self.stats.max_depth.max(node.depth());
        let id = self.stats.nodes;
        let fixing = node.fixing(self.root);
        let tol = self.config.tol();

        let point = match relaxation::solve(self.instance, &fixing, self.config.relaxation()) {
            Ok(point) => point,
            Err(infeasible) => {
                self.stats.pruned_infeasible += 1;
                if self.config.logging() {
                    tracing::debug!(node = id, tried = infeasible.tried, "pruned: infeasible");
                }
                return self.emit(&Event::Pruned {
                    node: id,
                    reason: Prune::Infeasible,
                });
            }
        };

        if id == 1 {
            self.stats.root_bound = Some(point.bound);
        }

        let step = self.emit(&Event::Relaxed {
            node: id,
            depth: node.depth(),
            fixing: &fixing,
            point: &point,
        });
        if let Step::Stop = step {
            return step;
        }

        let best = self
            .incumbent
            .as_ref()
            .map_or(f64::NEG_INFINITY, |incumbent| incumbent.objective);
        if point.bound <= best + tol {
            self.stats.pruned_by_bound += 1;
            if self.config.logging() {
                tracing::debug!(node = id, bound = point.bound, incumbent = best, "pruned: bound");
            }
            return self.emit(&Event::Pruned {
                node: id,
                reason: Prune::Bound {
                    bound: point.bound,
                    incumbent: best,
                },
            });
        }

        if point.is_integral(tol) {
            let allocation: Vec<f64> = point.allocation.iter().map(|x| x.round()).collect();
            let objective = self.instance.evaluate(&allocation);

            if objective > best {
                self.stats.improvements += 1;
                if self.config.logging() {
                    tracing::info!(node = id, objective, "new incumbent");
                }
                let incumbent = self.incumbent.insert(Incumbent {
                    objective,
                    allocation,
                    fixing: fixing.clone(),
                    node: id,
                });
                if let Some(Action::StopEarly) = self.observer.observe(&Event::Improved {
                    node: id,
                    incumbent,
                }) {
                    return Step::Stop;
                }
            }

            if point.bound <= objective + tol {
                return Step::Continue;
            }
        }

        let Some(index) = select(self.instance, &fixing, &point, self.config.rule(), tol) else {
            return Step::Continue;
        };

        self.stack.push(node.child(index, Bit::One));
        self.stack.push(node.child(index, Bit::Zero));
        if self.config.logging() {
            tracing::debug!(
                node = id,
                index,
                value = point.allocation[index],
                bound = point.bound,
                "branched"
            );
        }

        self.emit(&Event::Branched {
            node: id,
            index,
            value: point.allocation[index],
        })
    }

    fn emit(&mut self, event: &Event<'_>) -> Step {
        match self.observer.observe(event) {
            Some(Action::StopEarly) => Step::Stop,
            None => Step::Continue,
        }
    }
}

/// Chooses the free item to branch on, or `None` if every item is fixed.
///
/// The fractional rule falls back to the attractiveness rule when no free
/// item is fractional. Ties go to the lowest index.
fn select(
    instance: &Instance,
    fixing: &Fixing,
    point: &RelaxationPoint,
    rule: BranchRule,
    tol: f64,
) -> Option<usize> {
    if rule == BranchRule::Fractional {
        let closest = fixing
            .free_indices()
            .filter_map(|index| {
                let x = point.allocation[index];
                ((x - x.round()).abs() > tol).then_some((index, (x - 0.5).abs()))
            })
            .fold(None, |best: Option<(usize, f64)>, (index, score)| match best {
                Some((_, top)) if score >= top => best,
                _ => Some((index, score)),
            });
        if let Some((index, _)) = closest {
            return Some(index);
        }
    }

    let penalty = instance.penalty();
    fixing
        .free_indices()
        .map(|index| (index, instance.item(index).attractiveness(point.z, penalty)))
        .fold(None, |best: Option<(usize, f64)>, (index, score)| match best {
            Some((_, top)) if score <= top => best,
            _ => Some((index, score)),
        })
        .map(|(index, _)| index)
}

#[cfg(test)]
mod tests {
    use super::*;

    use sskp_core::Item;

    fn point(allocation: Vec<f64>, z: f64) -> RelaxationPoint {
        RelaxationPoint {
            allocation,
            z,
            variance: 1.0,
            objective: 0.0,
            bound: 0.0,
            threshold: None,
        }
    }

    fn instance() -> Instance {
        Instance::new(
            vec![
                Item::new(1.0, 1.0, 1.0),
                Item::new(1.0, 1.0, 3.0),
                Item::new(1.0, 1.0, 2.0),
            ],
            2.0,
            1.0,
        )
        .expect("valid instance")
    }

    #[test]
    fn fractional_rule_picks_value_closest_to_half() {
        let point = point(vec![0.2, 0.9, 0.6], 0.0);
        let index = select(&instance(), &Fixing::free(3), &point, BranchRule::Fractional, 1e-6);
        assert_eq!(index, Some(2));
    }

    #[test]
    fn fractional_rule_ignores_fixed_items() {
        let point = point(vec![0.5, 0.0, 0.3], 0.0);
        let fixing = Fixing::free(3).with(0, Bit::One);
        let index = select(&instance(), &fixing, &point, BranchRule::Fractional, 1e-6);
        assert_eq!(index, Some(2));
    }

    #[test]
    fn fractional_rule_falls_back_to_attractiveness() {
        let point = point(vec![1.0, 0.0, 1.0], 0.0);
        let index = select(&instance(), &Fixing::free(3), &point, BranchRule::Fractional, 1e-6);
        // Item 1 has the highest revenue and identical size statistics.
        assert_eq!(index, Some(1));
    }

    #[test]
    fn attractiveness_ties_keep_lowest_index() {
        let instance = Instance::new(vec![Item::new(1.0, 0.0, 1.0); 3], 1.0, 100.0)
            .expect("valid instance");
        // Every deterministic item scores −∞ here.
        let point = point(vec![0.5, 0.5, 0.5], 0.0);
        let fixing = Fixing::free(3).with(0, Bit::Zero);
        let index = select(&instance, &fixing, &point, BranchRule::Attractiveness, 1e-6);
        assert_eq!(index, Some(1));
    }

    #[test]
    fn no_free_items_selects_nothing() {
        let point = point(vec![1.0, 0.0, 1.0], 0.0);
        let fixing = Fixing::free(3)
            .with(0, Bit::One)
            .with(1, Bit::Zero)
            .with(2, Bit::One);
        let index = select(&instance(), &fixing, &point, BranchRule::Attractiveness, 1e-6);
        assert_eq!(index, None);
    }
}
