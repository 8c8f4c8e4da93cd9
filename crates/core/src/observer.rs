/// Receives solver events and decides how the search should proceed.
///
/// Observers let callers monitor or steer a solver without changing its API,
/// enabling logging, early stopping, or custom control policies.
///
/// The `observe` method returns `Option<A>`, where `Some(action)` requests a
/// solver-specific action and `None` lets the solver continue unchanged.
///
/// Closures automatically implement `Observer`, and a built-in impl for `()`
/// provides a no-op observer that always returns `None`.
pub trait Observer<E, A> {
    /// Observes a solver event and optionally returns a control action.
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drive<O: Observer<u32, &'static str>>(mut observer: O, events: &[u32]) -> Vec<&'static str> {
        events
            .iter()
            .filter_map(|event| observer.observe(event))
            .collect()
    }

    #[test]
    fn closure_observer_returns_actions() {
        let mut seen = 0;
        let actions = drive(
            |event: &u32| {
                seen += 1;
                (*event > 2).then_some("stop")
            },
            &[1, 2, 3, 4],
        );
        assert_eq!(actions, vec!["stop", "stop"]);
        assert_eq!(seen, 4);
    }

    #[test]
    fn unit_observer_is_silent() {
        assert!(drive((), &[1, 2, 3]).is_empty());
    }
}
