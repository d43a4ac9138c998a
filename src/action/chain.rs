//! Step machine for interactive decisions.
//!
//! An `ActionChain` turns "pick a player, then pick one of their cards,
//! then confirm" into a list of steps. Each step receives the results of
//! the steps before it and presents its UI. The chain then suspends until
//! the UI calls [`ActionChain::next`] with the step's result or
//! [`ActionChain::prev`] to go back.
//!
//! ## Navigation
//!
//! - `next` from the last step completes the chain: the completion
//!   callback receives every step's result, in order.
//! - `prev` from step `i > 0` drops the result of step `i - 1` and runs
//!   step `i - 1` again with the results it originally saw.
//! - `prev` from the first step cancels the chain.
//!
//! A step may also navigate synchronously through its [`StepControls`]
//! (for example to skip itself when there is nothing to choose).
//!
//! Calling `next` or `prev` on a chain that is not waiting on a step is a
//! bug in the caller and panics.

type Step<C, D> = Box<dyn FnMut(&mut C, &[D], &mut StepControls<D>)>;
type Completion<C, D> = Box<dyn FnOnce(&mut C, Vec<D>)>;
type Cancellation<C> = Box<dyn FnOnce(&mut C)>;

enum Navigation<D> {
    Next(D),
    Prev,
}

/// Synchronous navigation handle passed to a running step.
pub struct StepControls<D> {
    request: Option<Navigation<D>>,
}

impl<D> StepControls<D> {
    fn new() -> Self {
        Self { request: None }
    }

    /// Finish this step with `value`.
    pub fn next(&mut self, value: D) {
        assert!(self.request.is_none(), "step navigated twice");
        self.request = Some(Navigation::Next(value));
    }

    /// Go back to the previous step (or cancel from the first).
    pub fn prev(&mut self) {
        assert!(self.request.is_none(), "step navigated twice");
        self.request = Some(Navigation::Prev);
    }
}

/// Where the chain is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChainState {
    /// Built but not started.
    Pending,
    /// Waiting for input on step `n`.
    Live(usize),
    Completed,
    Cancelled,
}

/// Ordered, cancellable multi-step interaction.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use fengsheng_core::action::ActionChain;
///
/// let done = Rc::new(RefCell::new(None));
/// let sink = Rc::clone(&done);
///
/// let mut chain = ActionChain::<(), u32>::new()
///     .add_step(|_, _, _| {})
///     .add_step(|_, _, _| {})
///     .on_complete(move |_, results| *sink.borrow_mut() = Some(results));
///
/// chain.start(&mut ());
/// chain.next(&mut (), 1);
/// chain.next(&mut (), 2);
///
/// assert_eq!(*done.borrow(), Some(vec![1, 2]));
/// ```
pub struct ActionChain<C, D> {
    steps: Vec<Step<C, D>>,
    results: Vec<D>,
    state: ChainState,
    on_complete: Option<Completion<C, D>>,
    on_cancel: Option<Cancellation<C>>,
}

impl<C, D> Default for ActionChain<C, D> {
    fn default() -> Self {
        Self {
            steps: Vec::new(),
            results: Vec::new(),
            state: ChainState::Pending,
            on_complete: None,
            on_cancel: None,
        }
    }
}

impl<C, D: std::fmt::Debug> std::fmt::Debug for ActionChain<C, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionChain")
            .field("steps", &self.steps.len())
            .field("results", &self.results)
            .field("state", &self.state)
            .finish()
    }
}

impl<C, D> ActionChain<C, D> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step (builder pattern).
    #[must_use]
    pub fn add_step<F>(mut self, step: F) -> Self
    where
        F: FnMut(&mut C, &[D], &mut StepControls<D>) + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Set the completion callback (builder pattern).
    #[must_use]
    pub fn on_complete<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut C, Vec<D>) + 'static,
    {
        self.on_complete = Some(Box::new(callback));
        self
    }

    /// Set the cancellation callback (builder pattern).
    #[must_use]
    pub fn on_cancel<F>(mut self, callback: F) -> Self
    where
        F: FnOnce(&mut C) + 'static,
    {
        self.on_cancel = Some(Box::new(callback));
        self
    }

    #[must_use]
    pub fn state(&self) -> ChainState {
        self.state
    }

    /// Is a step waiting for input?
    #[must_use]
    pub fn is_live(&self) -> bool {
        matches!(self.state, ChainState::Live(_))
    }

    /// Has the chain completed or been cancelled?
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self.state, ChainState::Completed | ChainState::Cancelled)
    }

    /// Index of the live step.
    #[must_use]
    pub fn current_step(&self) -> Option<usize> {
        match self.state {
            ChainState::Live(index) => Some(index),
            _ => None,
        }
    }

    /// Results accumulated so far.
    #[must_use]
    pub fn results(&self) -> &[D] {
        &self.results
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Run the first step. A chain with no steps completes immediately.
    pub fn start(&mut self, ctx: &mut C) {
        assert_eq!(self.state, ChainState::Pending, "chain already started");
        self.run_from(ctx, 0);
    }

    /// Finish the live step with `value` and advance.
    pub fn next(&mut self, ctx: &mut C, value: D) {
        let ChainState::Live(index) = self.state else {
            panic!("next() on a chain that is not live ({:?})", self.state);
        };
        self.results.push(value);
        self.run_from(ctx, index + 1);
    }

    /// Return to the previous step, or cancel from the first.
    pub fn prev(&mut self, ctx: &mut C) {
        let ChainState::Live(index) = self.state else {
            panic!("prev() on a chain that is not live ({:?})", self.state);
        };
        self.step_back(ctx, index);
    }

    fn step_back(&mut self, ctx: &mut C, index: usize) {
        if index == 0 {
            self.cancel(ctx);
        } else {
            self.results.truncate(index - 1);
            self.run_from(ctx, index - 1);
        }
    }

    fn run_from(&mut self, ctx: &mut C, mut index: usize) {
        loop {
            if index >= self.steps.len() {
                self.complete(ctx);
                return;
            }
            self.state = ChainState::Live(index);

            let mut controls = StepControls::new();
            let step = &mut self.steps[index];
            step(ctx, &self.results, &mut controls);

            match controls.request {
                None => return,
                Some(Navigation::Next(value)) => {
                    self.results.push(value);
                    index += 1;
                }
                Some(Navigation::Prev) if index == 0 => {
                    self.cancel(ctx);
                    return;
                }
                Some(Navigation::Prev) => {
                    self.results.truncate(index - 1);
                    index -= 1;
                }
            }
        }
    }

    fn complete(&mut self, ctx: &mut C) {
        self.state = ChainState::Completed;
        let results = std::mem::take(&mut self.results);
        if let Some(callback) = self.on_complete.take() {
            callback(ctx, results);
        }
    }

    fn cancel(&mut self, ctx: &mut C) {
        self.state = ChainState::Cancelled;
        self.results.clear();
        if let Some(callback) = self.on_cancel.take() {
            callback(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Log {
        seen: Vec<(usize, Vec<char>)>,
        completed: Vec<Vec<char>>,
        cancelled: usize,
    }

    fn chain_of(n: usize) -> ActionChain<Log, char> {
        let mut chain = ActionChain::new();
        for i in 0..n {
            chain = chain.add_step(move |log: &mut Log, data: &[char], _: &mut StepControls<char>| {
                log.seen.push((i, data.to_vec()));
            });
        }
        chain
            .on_complete(|log: &mut Log, results| log.completed.push(results))
            .on_cancel(|log: &mut Log| log.cancelled += 1)
    }

    #[test]
    fn test_three_nexts_complete_once() {
        let mut log = Log::default();
        let mut chain = chain_of(3);

        chain.start(&mut log);
        chain.next(&mut log, 'a');
        chain.next(&mut log, 'b');
        chain.next(&mut log, 'c');

        assert_eq!(log.completed, vec![vec!['a', 'b', 'c']]);
        assert_eq!(log.cancelled, 0);
        assert_eq!(chain.state(), ChainState::Completed);
    }

    #[test]
    fn test_prev_reruns_previous_step_with_its_data() {
        let mut log = Log::default();
        let mut chain = chain_of(3);

        chain.start(&mut log);
        chain.next(&mut log, 'a');
        assert_eq!(chain.current_step(), Some(1));

        chain.prev(&mut log);
        assert_eq!(chain.current_step(), Some(0));
        assert_eq!(log.seen.last(), Some(&(0, vec![])));
        assert!(chain.results().is_empty());

        chain.next(&mut log, 'x');
        chain.next(&mut log, 'y');
        chain.next(&mut log, 'z');
        assert_eq!(log.completed, vec![vec!['x', 'y', 'z']]);
    }

    #[test]
    fn test_prev_from_last_step_keeps_earlier_results() {
        let mut log = Log::default();
        let mut chain = chain_of(3);

        chain.start(&mut log);
        chain.next(&mut log, 'a');
        chain.next(&mut log, 'b');
        chain.prev(&mut log);

        assert_eq!(log.seen.last(), Some(&(1, vec!['a'])));
        assert_eq!(chain.results(), &['a']);
    }

    #[test]
    fn test_prev_on_first_step_cancels() {
        let mut log = Log::default();
        let mut chain = chain_of(3);

        chain.start(&mut log);
        chain.prev(&mut log);

        assert_eq!(log.cancelled, 1);
        assert!(log.completed.is_empty());
        assert_eq!(chain.state(), ChainState::Cancelled);
    }

    #[test]
    fn test_empty_chain_completes_on_start() {
        let mut log = Log::default();
        let mut chain = chain_of(0);
        chain.start(&mut log);
        assert_eq!(log.completed, vec![Vec::<char>::new()]);
    }

    #[test]
    fn test_synchronous_next_skips_step() {
        let mut log = Log::default();
        let mut chain: ActionChain<Log, char> = ActionChain::new()
            .add_step(|_: &mut Log, _: &[char], controls: &mut StepControls<char>| controls.next('s'))
            .add_step(|log: &mut Log, data: &[char], _: &mut StepControls<char>| {
                log.seen.push((1, data.to_vec()));
            })
            .on_complete(|log: &mut Log, results| log.completed.push(results));

        chain.start(&mut log);
        assert_eq!(chain.current_step(), Some(1));
        assert_eq!(log.seen, vec![(1, vec!['s'])]);

        chain.next(&mut log, 't');
        assert_eq!(log.completed, vec![vec!['s', 't']]);
    }

    #[test]
    #[should_panic(expected = "not live")]
    fn test_next_after_completion_panics() {
        let mut log = Log::default();
        let mut chain = chain_of(1);
        chain.start(&mut log);
        chain.next(&mut log, 'a');
        chain.next(&mut log, 'b');
    }

    #[test]
    #[should_panic(expected = "not live")]
    fn test_prev_before_start_panics() {
        let mut log = Log::default();
        let mut chain = chain_of(2);
        chain.prev(&mut log);
    }
}
