//! Callback-style adapters over plain functions.
//!
//! The dual of [`to_sync`](crate::to_sync): each adapter takes an ordinary
//! function and returns one that accepts its inputs plus completion
//! callbacks, submits the real call to an execution context and returns
//! straight away.
//!
//! - `to_async*`: infallible functions, success callback only
//! - `to_async_split*`: functions returning `Result<O, E>`; exactly one of
//!   the success or error callback fires
//!
//! Each adapted function owns one [`ConcurrentContext`], created when it is
//! adapted rather than per call. The context runs jobs concurrently, so the
//! adapted function may be called again before earlier calls complete.
//!
//! A function that panics never calls back.
//!
//! # Examples
//!
//! ```rust
//! use core_bridge::{no_start, to_async2, to_sync2};
//!
//! let add = to_async2(|a: i32, b: i32| a + b);
//! let add = to_sync2(add, no_start);
//! assert_eq!(add(40, 2), 42);
//! ```

use crate::callback::{Completion, Failure};
use core_exec::{ConcurrentContext, ExecutionContext};
use std::sync::Arc;

/// Adapts an infallible single-input function to run on `context`.
pub fn to_async_on<C, I, O, F>(context: C, f: F) -> impl Fn(I, Completion<O>)
where
    C: ExecutionContext,
    F: Fn(I) -> O + Send + Sync + 'static,
    I: Send + 'static,
    O: Send + 'static,
{
    let f = Arc::new(f);
    move |input: I, done: Completion<O>| {
        let f = Arc::clone(&f);
        context.submit(Box::new(move || done(f(input))));
    }
}

/// Adapts a fallible single-input function to run on `context`.
pub fn to_async_split_on<C, I, O, E, F>(
    context: C,
    f: F,
) -> impl Fn(I, Completion<O>, Failure<E>)
where
    C: ExecutionContext,
    F: Fn(I) -> Result<O, E> + Send + Sync + 'static,
    I: Send + 'static,
    O: Send + 'static,
    E: Send + 'static,
{
    let f = Arc::new(f);
    move |input: I, done: Completion<O>, fail: Failure<E>| {
        let f = Arc::clone(&f);
        context.submit(Box::new(move || match f(input) {
            Ok(output) => done(output),
            Err(error) => {
                tracing::debug!("Adapted function returned an error");
                fail(error)
            }
        }));
    }
}

macro_rules! to_async_arity {
    ($n:literal => $plain:ident, $split:ident; $($input:ident: $I:ident),*) => {
        #[doc = concat!(
            "Adapts an infallible ", $n,
            "-input function to run on its own concurrent context."
        )]
        pub fn $plain<$($I,)* O, F>(f: F) -> impl Fn($($I,)* Completion<O>)
        where
            F: Fn($($I),*) -> O + Send + Sync + 'static,
            $($I: Send + 'static,)*
            O: Send + 'static,
        {
            let call = to_async_on(
                ConcurrentContext::new(stringify!($plain)),
                move |($($input,)*): ($($I,)*)| f($($input),*),
            );
            move |$($input: $I,)* done: Completion<O>| call(($($input,)*), done)
        }

        #[doc = concat!(
            "Adapts a fallible ", $n,
            "-input function to run on its own concurrent context."
        )]
        pub fn $split<$($I,)* O, E, F>(f: F) -> impl Fn($($I,)* Completion<O>, Failure<E>)
        where
            F: Fn($($I),*) -> Result<O, E> + Send + Sync + 'static,
            $($I: Send + 'static,)*
            O: Send + 'static,
            E: Send + 'static,
        {
            let call = to_async_split_on(
                ConcurrentContext::new(stringify!($split)),
                move |($($input,)*): ($($I,)*)| f($($input),*),
            );
            move |$($input: $I,)* done: Completion<O>, fail: Failure<E>| {
                call(($($input,)*), done, fail)
            }
        }
    };
}

to_async_arity!(0 => to_async0, to_async_split0;);
to_async_arity!(1 => to_async1, to_async_split1; i0: I0);
to_async_arity!(2 => to_async2, to_async_split2; i0: I0, i1: I1);
to_async_arity!(3 => to_async3, to_async_split3; i0: I0, i1: I1, i2: I2);
to_async_arity!(4 => to_async4, to_async_split4; i0: I0, i1: I1, i2: I2, i3: I3);
