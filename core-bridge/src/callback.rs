//! Callback shapes shared by both adapter directions.
//!
//! Callback-style operations receive their completion handlers as boxed
//! one-shot closures so that a plain (non-generic) closure can accept them
//! and move them to whichever thread eventually completes the work.
//!
//! | Convention                | Success                 | Failure              |
//! |---------------------------|-------------------------|----------------------|
//! | no error path             | [`Completion<O>`]       | none                 |
//! | separate error callback   | [`Completion<O>`]       | [`Failure<E>`]       |
//! | trailing optional error   | [`Reply<O, E>`]         | same callback        |
//! | trailing error, no output | [`Status<E>`]           | same callback        |
//!
//! Several outputs travel as one tuple `O`, in argument order.

/// Success callback carrying the operation's output.
pub type Completion<O> = Box<dyn FnOnce(O) + Send + 'static>;

/// Error callback carrying the operation's failure.
pub type Failure<E> = Box<dyn FnOnce(E) + Send + 'static>;

/// Single callback carrying an output and, when the operation failed, an error.
///
/// The output is ignored whenever the error is `Some`.
pub type Reply<O, E> = Box<dyn FnOnce(O, Option<E>) + Send + 'static>;

/// Single callback reporting only whether the operation failed.
pub type Status<E> = Box<dyn FnOnce(Option<E>) + Send + 'static>;

/// The untyped error convention.
///
/// Operations that report "some error" rather than a specific type use this;
/// every `E: std::error::Error + Send + Sync + 'static` converts into it.
pub type AnyError = anyhow::Error;

/// The default `start` hook: ignores the operation handle.
pub fn no_start<R>(_handle: R) {}
