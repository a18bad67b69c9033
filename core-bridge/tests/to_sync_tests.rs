//! Integration tests for the blocking adapters.
//!
//! Every fake operation below completes on a worker thread via `dispatch`,
//! the way real callback APIs do.

use core_bridge::*;
use core_exec::wait_a_bit;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum FetchError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("request cancelled")]
    Cancelled,
}

type Reply2<A, B, E> = Box<dyn FnOnce(A, B, Option<E>) + Send>;
type Reply3<A, B, C, E> = Box<dyn FnOnce(A, B, C, Option<E>) + Send>;
type Reply4<A, B, C, D, E> = Box<dyn FnOnce(A, B, C, D, Option<E>) + Send>;

#[test]
fn test_plain_arities_return_callback_values() {
    let zero = to_sync0(
        |done: Completion<&'static str>| dispatch(move || done("zero")),
        no_start,
    );
    assert_eq!(zero(), "zero");

    let one = to_sync1(
        |a: i32, done: Completion<i32>| dispatch(move || done(a + 1)),
        no_start,
    );
    assert_eq!(one(41), 42);

    let two = to_sync2(
        |a: i32, b: String, done: Completion<String>| dispatch(move || done(format!("{a}{b}"))),
        no_start,
    );
    assert_eq!(two(7, "x".to_string()), "7x");

    let three = to_sync3(
        |a: u8, b: u8, c: u8, done: Completion<(u8, u8, u8)>| dispatch(move || done((c, b, a))),
        no_start,
    );
    assert_eq!(three(1, 2, 3), (3, 2, 1));

    let four = to_sync4(
        |a: i64, b: i64, c: i64, d: i64, done: Completion<i64>| {
            dispatch(move || done(a * 1000 + b * 100 + c * 10 + d))
        },
        no_start,
    );
    assert_eq!(four(1, 2, 3, 4), 1234);
}

#[test]
fn test_plain_unit_output() {
    let touched = Arc::new(AtomicUsize::new(0));
    let seen = Arc::clone(&touched);
    let touch = to_sync1(
        move |n: usize, done: Completion<()>| {
            let seen = Arc::clone(&seen);
            dispatch(move || {
                seen.fetch_add(n, Ordering::SeqCst);
                done(());
            })
        },
        no_start,
    );

    touch(3);
    assert_eq!(touched.load(Ordering::SeqCst), 3);
}

#[test]
fn test_split_arities_success_and_error() {
    let zero = to_sync_split0(
        |done: Completion<u8>, _fail: Failure<FetchError>| dispatch(move || done(0)),
        no_start,
    );
    assert_eq!(zero(), Ok(0));

    let lookup = to_sync_split1(
        |key: String, done: Completion<usize>, fail: Failure<FetchError>| {
            dispatch(move || {
                if key.is_empty() {
                    fail(FetchError::NotFound(key));
                } else {
                    done(key.len());
                }
            })
        },
        no_start,
    );
    assert_eq!(lookup("abc".to_string()), Ok(3));
    assert_eq!(
        lookup(String::new()),
        Err(FetchError::NotFound(String::new()))
    );

    let checked_sub = to_sync_split2(
        |a: u32, b: u32, done: Completion<u32>, fail: Failure<String>| {
            dispatch(move || match a.checked_sub(b) {
                Some(value) => done(value),
                None => fail(format!("{a} - {b} underflows")),
            })
        },
        no_start,
    );
    assert_eq!(checked_sub(5, 3), Ok(2));
    assert_eq!(checked_sub(3, 5), Err("3 - 5 underflows".to_string()));

    let three = to_sync_split3(
        |a: i32, b: i32, c: i32, done: Completion<i32>, fail: Failure<i32>| {
            dispatch(move || if c == 0 { fail(a + b) } else { done((a + b) / c) })
        },
        no_start,
    );
    assert_eq!(three(4, 6, 2), Ok(5));
    assert_eq!(three(4, 6, 0), Err(10));

    let four = to_sync_split4(
        |a: bool, b: bool, c: bool, d: bool, done: Completion<[bool; 4]>, fail: Failure<()>| {
            dispatch(move || if a && b && c && d { fail(()) } else { done([a, b, c, d]) })
        },
        no_start,
    );
    assert_eq!(four(true, false, true, false), Ok([true, false, true, false]));
    assert_eq!(four(true, true, true, true), Err(()));
}

#[test]
fn test_split_untyped_error() {
    let read = to_sync_split1(
        |path: String, done: Completion<Vec<u8>>, fail: Failure<AnyError>| {
            dispatch(move || {
                if path.ends_with(".missing") {
                    fail(FetchError::NotFound(path).into());
                } else {
                    done(path.into_bytes());
                }
            })
        },
        no_start,
    );

    assert_eq!(read("a".to_string()).unwrap(), b"a".to_vec());

    let err = read("song.missing".to_string()).unwrap_err();
    assert_eq!(err.to_string(), "not found: song.missing");
    assert_eq!(
        err.downcast_ref::<FetchError>(),
        Some(&FetchError::NotFound("song.missing".to_string()))
    );
}

#[test]
fn test_trailing_arities() {
    let zero = to_sync_trailing0(
        |reply: Reply<u8, String>| dispatch(move || reply(1, None)),
        no_start,
    );
    assert_eq!(zero(), Ok(1));

    let one = to_sync_trailing1(
        |x: i32, reply: Reply<i32, FetchError>| {
            dispatch(move || {
                if x < 0 {
                    reply(0, Some(FetchError::NotFound(x.to_string())))
                } else {
                    reply(x * 3, None)
                }
            })
        },
        no_start,
    );
    assert_eq!(one(2), Ok(6));
    assert_eq!(one(-1), Err(FetchError::NotFound("-1".to_string())));

    let two = to_sync_trailing2(
        |a: String, b: String, reply: Reply<String, ()>| dispatch(move || reply(a + &b, None)),
        no_start,
    );
    assert_eq!(two("ab".to_string(), "cd".to_string()), Ok("abcd".to_string()));

    let three = to_sync_trailing3(
        |_: u8, _: u8, _: u8, reply: Reply<u8, &'static str>| {
            dispatch(move || reply(9, Some("ignored output")))
        },
        no_start,
    );
    assert_eq!(three(1, 2, 3), Err("ignored output"));

    let four = to_sync_trailing4(
        |a: u16, b: u16, c: u16, d: u16, reply: Reply<(u16, u16), ()>| {
            dispatch(move || reply((a + b, c + d), None))
        },
        no_start,
    );
    assert_eq!(four(1, 2, 3, 4), Ok((3, 7)));
}

#[test]
fn test_status_arities() {
    let flush = to_sync_status0(
        |status: Status<FetchError>| dispatch(move || status(None)),
        no_start,
    );
    assert_eq!(flush(), Ok(()));

    let delete = to_sync_status1(
        |id: u32, status: Status<FetchError>| {
            dispatch(move || {
                status((id == 0).then(|| FetchError::NotFound(id.to_string())))
            })
        },
        no_start,
    );
    assert_eq!(delete(7), Ok(()));
    assert_eq!(delete(0), Err(FetchError::NotFound("0".to_string())));

    let rename = to_sync_status2(
        |from: String, to: String, status: Status<String>| {
            dispatch(move || status((from == to).then(|| format!("{from} is {to}"))))
        },
        no_start,
    );
    assert_eq!(rename("a".to_string(), "b".to_string()), Ok(()));
    assert_eq!(
        rename("a".to_string(), "a".to_string()),
        Err("a is a".to_string())
    );

    let three = to_sync_status3(
        |_: (), _: (), _: (), status: Status<()>| dispatch(move || status(Some(()))),
        no_start,
    );
    assert_eq!(three((), (), ()), Err(()));

    let four = to_sync_status4(
        |_: i8, _: i8, _: i8, _: i8, status: Status<()>| dispatch(move || status(None)),
        no_start,
    );
    assert_eq!(four(1, 2, 3, 4), Ok(()));
}

#[test]
fn test_reply_spread_outputs_in_order() {
    let stat = to_sync_reply0_2(
        |reply: Reply2<u64, bool, FetchError>| dispatch(move || reply(512, true, None)),
        no_start,
    );
    assert_eq!(stat(), Ok((512, true)));

    let fetch = to_sync_reply1_3(
        |url: String, reply: Reply3<u16, String, Vec<u8>, FetchError>| {
            dispatch(move || {
                if url.starts_with("https://") {
                    reply(200, "text/plain".to_string(), b"hi".to_vec(), None)
                } else {
                    reply(0, String::new(), Vec::new(), Some(FetchError::NotFound(url)))
                }
            })
        },
        no_start,
    );
    assert_eq!(
        fetch("https://example.org".to_string()),
        Ok((200, "text/plain".to_string(), b"hi".to_vec()))
    );
    assert_eq!(
        fetch("gopher://x".to_string()),
        Err(FetchError::NotFound("gopher://x".to_string()))
    );

    let split = to_sync_reply2_4(
        |a: u32, b: u32, reply: Reply4<u32, u32, u32, u32, ()>| {
            dispatch(move || reply(a / b, a % b, b, a, None))
        },
        no_start,
    );
    assert_eq!(split(17, 5), Ok((3, 2, 5, 17)));

    let corners = to_sync_reply4_4(
        |a: i8, b: i8, c: i8, d: i8, reply: Reply4<i8, i8, i8, i8, String>| {
            dispatch(move || reply(d, c, b, a, None))
        },
        no_start,
    );
    assert_eq!(corners(1, 2, 3, 4), Ok((4, 3, 2, 1)));

    let pair = to_sync_reply3_2(
        |a: u8, b: u8, c: u8, reply: Reply2<u8, u8, &'static str>| {
            dispatch(move || reply(a, b + c, Some("denied")))
        },
        no_start,
    );
    assert_eq!(pair(1, 2, 3), Err("denied"));
}

#[test]
fn test_start_receives_operation_handle() {
    let handles = Arc::new(Mutex::new(Vec::new()));
    let next_id = Arc::new(AtomicUsize::new(100));

    let ids = Arc::clone(&next_id);
    let op = move |x: i32, done: Completion<i32>| -> usize {
        dispatch(move || done(x));
        ids.fetch_add(1, Ordering::SeqCst)
    };

    let recorded = Arc::clone(&handles);
    let call = to_sync1(op, move |handle: usize| recorded.lock().unwrap().push(handle));

    assert_eq!(call(1), 1);
    assert_eq!(call(2), 2);
    assert_eq!(*handles.lock().unwrap(), vec![100, 101]);
}

#[test]
fn test_start_side_effects_visible_after_return() {
    let started = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&started);
    let call = to_sync0(
        |done: Completion<()>| {
            dispatch(move || {
                wait_a_bit();
                done(())
            })
        },
        move |_: ()| {
            counter.fetch_add(1, Ordering::SeqCst);
        },
    );

    for expected in 1..=3 {
        call();
        assert_eq!(started.load(Ordering::SeqCst), expected);
    }
}

#[test]
fn test_start_can_cancel_through_handle() {
    let search = |query: String, done: Completion<String>, fail: Failure<FetchError>| {
        let token = CancellationToken::new();
        let watched = token.clone();
        dispatch(move || {
            for _ in 0..100 {
                if watched.is_cancelled() {
                    return fail(FetchError::Cancelled);
                }
                wait_a_bit();
            }
            done(query)
        });
        token
    };

    let cancelled = to_sync_split1(search, |token: CancellationToken| token.cancel());
    assert_eq!(cancelled("q".to_string()), Err(FetchError::Cancelled));

    let untouched = to_sync_split1(
        |query: String, done: Completion<String>, _fail: Failure<FetchError>| {
            let token = CancellationToken::new();
            dispatch(move || done(query));
            token
        },
        no_start,
    );
    assert_eq!(untouched("q".to_string()), Ok("q".to_string()));
}

#[test]
fn test_misbehaving_operation_yields_one_outcome() {
    // Calls both callbacks from racing threads; the caller still sees exactly one.
    let both = to_sync_split0(
        |done: Completion<u8>, fail: Failure<u8>| {
            dispatch(move || done(1));
            dispatch(move || fail(2));
        },
        no_start,
    );

    for _ in 0..200 {
        match both() {
            Ok(value) => assert_eq!(value, 1),
            Err(error) => assert_eq!(error, 2),
        }
    }
}
