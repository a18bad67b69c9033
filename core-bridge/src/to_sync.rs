//! Blocking adapters over callback-style operations.
//!
//! Every adapter here turns an operation that reports completion through a
//! callback into a plain function that parks the caller until the callback
//! fires. All of them funnel into one routine:
//!
//! 1. arm a fresh [`Rendezvous`] for one release
//! 2. invoke the operation with callbacks that settle the rendezvous
//! 3. pass whatever the operation returned to the `start` hook
//! 4. park until the rendezvous is released, then return the output or the
//!    error
//!
//! # Naming
//!
//! Rust has no overloading, so the shape is spelled out in the name:
//!
//! - `to_sync*`: success callback only ([`Completion`])
//! - `to_sync_split*`: separate success and error callbacks ([`Completion`],
//!   [`Failure`])
//! - `to_sync_trailing*`: one callback with a trailing optional error
//!   ([`Reply`])
//! - `to_sync_status*`: one callback carrying only an optional error
//!   ([`Status`])
//! - `to_sync_reply{N}_{M}`: trailing optional error after `M` separate
//!   outputs, returned as an `M`-tuple
//!
//! The digit suffix is the number of inputs. The unsuffixed forms take a
//! single input, which may itself be a tuple.
//!
//! # The `start` hook
//!
//! `start` receives the operation's return value (its handle) on the
//! caller's thread before the caller parks. Use [`no_start`](crate::no_start)
//! when there is nothing to do. It must not block indefinitely, and it is the
//! only place a caller can cancel the underlying operation.
//!
//! # Deadlocks
//!
//! The wait has no timeout. An operation that never calls back parks the
//! caller forever, and an operation that needs the caller's own thread to be
//! free in order to call back deadlocks. Callbacks that fire synchronously,
//! before the operation even returns, are fine.
//!
//! # Examples
//!
//! ```rust
//! use core_bridge::{dispatch, no_start, to_sync_split2, Completion, Failure};
//!
//! fn divide(a: i32, b: i32, done: Completion<i32>, fail: Failure<String>) {
//!     dispatch(move || {
//!         if b == 0 {
//!             fail("division by zero".to_string());
//!         } else {
//!             done(a / b);
//!         }
//!     });
//! }
//!
//! let divide = to_sync_split2(divide, no_start);
//! assert_eq!(divide(10, 5), Ok(2));
//! assert_eq!(divide(1, 0), Err("division by zero".to_string()));
//! ```

use crate::callback::{Completion, Failure, Reply, Status};
use core_exec::Rendezvous;
use std::convert::Infallible;
use std::sync::Arc;

fn block_on_callbacks<O, E, R>(
    invoke: impl FnOnce(Arc<Rendezvous<O, E>>) -> R,
    start: impl FnOnce(R),
) -> Result<O, E> {
    let rendezvous = Rendezvous::armed();
    let handle = invoke(Arc::clone(&rendezvous));
    start(handle);

    tracing::trace!("Waiting for operation callback");
    rendezvous.wait()
}

/// Blocking adapter for an operation that cannot fail.
pub fn to_sync<I, O, R, F, S>(f: F, start: S) -> impl Fn(I) -> O
where
    F: Fn(I, Completion<O>) -> R,
    S: Fn(R),
    O: Send + 'static,
{
    move |input: I| {
        let outcome = block_on_callbacks::<O, Infallible, R>(
            |rendezvous| {
                f(
                    input,
                    Box::new(move |output: O| {
                        rendezvous.fulfill(output);
                    }),
                )
            },
            &start,
        );
        match outcome {
            Ok(output) => output,
            Err(never) => match never {},
        }
    }
}

/// Blocking adapter for an operation with separate success and error
/// callbacks.
pub fn to_sync_split<I, O, E, R, F, S>(f: F, start: S) -> impl Fn(I) -> Result<O, E>
where
    F: Fn(I, Completion<O>, Failure<E>) -> R,
    S: Fn(R),
    O: Send + 'static,
    E: Send + 'static,
{
    move |input: I| {
        block_on_callbacks(
            |rendezvous: Arc<Rendezvous<O, E>>| {
                let on_error = Arc::clone(&rendezvous);
                f(
                    input,
                    Box::new(move |output: O| {
                        rendezvous.fulfill(output);
                    }),
                    Box::new(move |error: E| {
                        tracing::debug!("Operation reported an error");
                        on_error.reject(error);
                    }),
                )
            },
            &start,
        )
    }
}

/// Blocking adapter for an operation whose single callback carries a
/// trailing optional error.
///
/// When the error is `Some`, it is returned and the output is dropped.
pub fn to_sync_trailing<I, O, E, R, F, S>(f: F, start: S) -> impl Fn(I) -> Result<O, E>
where
    F: Fn(I, Reply<O, E>) -> R,
    S: Fn(R),
    O: Send + 'static,
    E: Send + 'static,
{
    move |input: I| {
        block_on_callbacks(
            |rendezvous: Arc<Rendezvous<O, E>>| {
                f(
                    input,
                    Box::new(move |output: O, error: Option<E>| {
                        match error {
                            Some(error) => {
                                tracing::debug!("Operation reported an error");
                                rendezvous.reject(error)
                            }
                            None => rendezvous.fulfill(output),
                        };
                    }),
                )
            },
            &start,
        )
    }
}

macro_rules! to_sync_arity {
    (
        $n:literal => $plain:ident, $split:ident, $trailing:ident, $status:ident;
        $($input:ident: $I:ident),*
    ) => {
        #[doc = concat!("[`to_sync`] for a ", $n, "-input operation.")]
        pub fn $plain<$($I,)* O, R, F, S>(f: F, start: S) -> impl Fn($($I),*) -> O
        where
            F: Fn($($I,)* Completion<O>) -> R,
            S: Fn(R),
            O: Send + 'static,
        {
            let call = to_sync(
                move |($($input,)*): ($($I,)*), done: Completion<O>| f($($input,)* done),
                start,
            );
            move |$($input: $I),*| call(($($input,)*))
        }

        #[doc = concat!("[`to_sync_split`] for a ", $n, "-input operation.")]
        pub fn $split<$($I,)* O, E, R, F, S>(f: F, start: S) -> impl Fn($($I),*) -> Result<O, E>
        where
            F: Fn($($I,)* Completion<O>, Failure<E>) -> R,
            S: Fn(R),
            O: Send + 'static,
            E: Send + 'static,
        {
            let call = to_sync_split(
                move |($($input,)*): ($($I,)*), done: Completion<O>, fail: Failure<E>| {
                    f($($input,)* done, fail)
                },
                start,
            );
            move |$($input: $I),*| call(($($input,)*))
        }

        #[doc = concat!("[`to_sync_trailing`] for a ", $n, "-input operation.")]
        pub fn $trailing<$($I,)* O, E, R, F, S>(f: F, start: S) -> impl Fn($($I),*) -> Result<O, E>
        where
            F: Fn($($I,)* Reply<O, E>) -> R,
            S: Fn(R),
            O: Send + 'static,
            E: Send + 'static,
        {
            let call = to_sync_trailing(
                move |($($input,)*): ($($I,)*), reply: Reply<O, E>| f($($input,)* reply),
                start,
            );
            move |$($input: $I),*| call(($($input,)*))
        }

        #[doc = concat!(
            "Blocking adapter for a ", $n,
            "-input operation that only reports an optional error."
        )]
        pub fn $status<$($I,)* E, R, F, S>(f: F, start: S) -> impl Fn($($I),*) -> Result<(), E>
        where
            F: Fn($($I,)* Status<E>) -> R,
            S: Fn(R),
            E: Send + 'static,
        {
            let call = to_sync_trailing(
                move |($($input,)*): ($($I,)*), reply: Reply<(), E>| {
                    f($($input,)* Box::new(move |error: Option<E>| reply((), error)))
                },
                start,
            );
            move |$($input: $I),*| call(($($input,)*))
        }
    };
}

to_sync_arity!(0 => to_sync0, to_sync_split0, to_sync_trailing0, to_sync_status0;);
to_sync_arity!(1 => to_sync1, to_sync_split1, to_sync_trailing1, to_sync_status1; i0: I0);
to_sync_arity!(2 => to_sync2, to_sync_split2, to_sync_trailing2, to_sync_status2; i0: I0, i1: I1);
to_sync_arity!(
    3 => to_sync3, to_sync_split3, to_sync_trailing3, to_sync_status3;
    i0: I0, i1: I1, i2: I2
);
to_sync_arity!(
    4 => to_sync4, to_sync_split4, to_sync_trailing4, to_sync_status4;
    i0: I0, i1: I1, i2: I2, i3: I3
);

macro_rules! to_sync_reply {
    (
        $name:ident, $n:literal, $m:literal;
        [$($input:ident: $I:ident),*];
        [$($output:ident: $O:ident),+]
    ) => {
        #[doc = concat!(
            "Blocking adapter for a ", $n, "-input operation whose callback receives ",
            $m, " outputs followed by an optional error."
        )]
        pub fn $name<$($I,)* $($O,)+ E, R, F, S>(
            f: F,
            start: S,
        ) -> impl Fn($($I),*) -> Result<($($O,)+), E>
        where
            F: Fn($($I,)* Box<dyn FnOnce($($O,)+ Option<E>) + Send + 'static>) -> R,
            S: Fn(R),
            $($O: Send + 'static,)+
            E: Send + 'static,
        {
            let call = to_sync_trailing(
                move |($($input,)*): ($($I,)*), reply: Reply<($($O,)+), E>| {
                    f(
                        $($input,)*
                        Box::new(move |$($output: $O,)+ error: Option<E>| {
                            reply(($($output,)+), error)
                        }),
                    )
                },
                start,
            );
            move |$($input: $I),*| call(($($input,)*))
        }
    };
}

to_sync_reply!(to_sync_reply0_2, 0, 2; []; [o0: O0, o1: O1]);
to_sync_reply!(to_sync_reply0_3, 0, 3; []; [o0: O0, o1: O1, o2: O2]);
to_sync_reply!(to_sync_reply0_4, 0, 4; []; [o0: O0, o1: O1, o2: O2, o3: O3]);
to_sync_reply!(to_sync_reply1_2, 1, 2; [i0: I0]; [o0: O0, o1: O1]);
to_sync_reply!(to_sync_reply1_3, 1, 3; [i0: I0]; [o0: O0, o1: O1, o2: O2]);
to_sync_reply!(to_sync_reply1_4, 1, 4; [i0: I0]; [o0: O0, o1: O1, o2: O2, o3: O3]);
to_sync_reply!(to_sync_reply2_2, 2, 2; [i0: I0, i1: I1]; [o0: O0, o1: O1]);
to_sync_reply!(to_sync_reply2_3, 2, 3; [i0: I0, i1: I1]; [o0: O0, o1: O1, o2: O2]);
to_sync_reply!(to_sync_reply2_4, 2, 4; [i0: I0, i1: I1]; [o0: O0, o1: O1, o2: O2, o3: O3]);
to_sync_reply!(to_sync_reply3_2, 3, 2; [i0: I0, i1: I1, i2: I2]; [o0: O0, o1: O1]);
to_sync_reply!(to_sync_reply3_3, 3, 3; [i0: I0, i1: I1, i2: I2]; [o0: O0, o1: O1, o2: O2]);
to_sync_reply!(
    to_sync_reply3_4, 3, 4;
    [i0: I0, i1: I1, i2: I2];
    [o0: O0, o1: O1, o2: O2, o3: O3]
);
to_sync_reply!(to_sync_reply4_2, 4, 2; [i0: I0, i1: I1, i2: I2, i3: I3]; [o0: O0, o1: O1]);
to_sync_reply!(
    to_sync_reply4_3, 4, 3;
    [i0: I0, i1: I1, i2: I2, i3: I3];
    [o0: O0, o1: O1, o2: O2]
);
to_sync_reply!(
    to_sync_reply4_4, 4, 4;
    [i0: I0, i1: I1, i2: I2, i3: I3];
    [o0: O0, o1: O1, o2: O2, o3: O3]
);
