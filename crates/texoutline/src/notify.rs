//! Structural update notifications.
//!
//! Whenever a file's structure changes, the engine tells exactly one
//! consumer (in practice, the duplicate-label checker) which file it was.
//!
//! # Example
//!
//! ```
//! # use std::cell::RefCell;
//! # use texoutline::notify::UpdateChannel;
//! let seen = RefCell::new(Vec::new());
//! let channel = UpdateChannel::bind(|file: &str| seen.borrow_mut().push(file.to_string()));
//!
//! channel.emit("/doc/main.tex");
//! assert_eq!(*seen.borrow(), ["/doc/main.tex"]);
//! ```

use log::trace;

/// Receives the identity of every file whose structure was updated.
pub trait UpdateConsumer {
    fn run(&self, file: &str);
}

impl<F> UpdateConsumer for F
where
    F: Fn(&str),
{
    fn run(&self, file: &str) {
        self(file)
    }
}

/// Forwards update events to the consumer it was bound to.
///
/// The consumer is fixed at construction. Every [`emit`](Self::emit) calls
/// it once, before returning.
#[derive(Debug)]
pub struct UpdateChannel<C> {
    consumer: C,
}

impl<C: UpdateConsumer> UpdateChannel<C> {
    pub fn bind(consumer: C) -> Self {
        Self { consumer }
    }

    /// Tell the consumer that `file` has a new structure.
    pub fn emit(&self, file: &str) {
        trace!(file; "Structure update");
        self.consumer.run(file);
    }

    pub fn consumer(&self) -> &C {
        &self.consumer
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    /// Records every file it is told about.
    #[derive(Default)]
    struct Recorder {
        files: RefCell<Vec<String>>,
    }

    impl UpdateConsumer for Recorder {
        fn run(&self, file: &str) {
            self.files.borrow_mut().push(file.to_string());
        }
    }

    #[test]
    fn test_single_delivery() {
        let channel = UpdateChannel::bind(Recorder::default());
        channel.emit("/doc/main.tex");

        assert_eq!(*channel.consumer().files.borrow(), ["/doc/main.tex"]);
    }

    #[test]
    fn test_delivery_is_synchronous_and_ordered() {
        let channel = UpdateChannel::bind(Recorder::default());
        for file in ["a.tex", "b.tex", "a.tex"] {
            channel.emit(file);
            assert_eq!(channel.consumer().files.borrow().last().map(String::as_str), Some(file));
        }

        // No deduplication
        assert_eq!(*channel.consumer().files.borrow(), ["a.tex", "b.tex", "a.tex"]);
    }

    #[test]
    fn test_closure_consumer() {
        let count = std::cell::Cell::new(0);
        let channel = UpdateChannel::bind(|file: &str| {
            assert_eq!(file, "untitled:1");
            count.set(count.get() + 1);
        });

        channel.emit("untitled:1");
        assert_eq!(count.get(), 1);
    }
}
