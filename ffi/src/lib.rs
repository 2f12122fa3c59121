//! C-ABI wrapper around `catalog-core`.
//!
//! # Overview
//! Lets a mobile host drive the products screen: it forwards keystrokes,
//! starts fetches and submits, executes the returned HTTP requests with its
//! own networking stack, hands the responses back, and renders view
//! snapshots.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A pending call is independent of its screen: completing it after
//!   `catalog_screen_free` is a no-op that yields an empty outcome.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `catalog_free_*` / `catalog_*_free` function.

pub mod types;

use std::os::raw::c_char;
use std::panic::catch_unwind;

use catalog_core::{NetworkError, ProductsScreen};
use tracing::warn;

use types::*;

// ---------------------------------------------------------------------------
// Screen lifecycle
// ---------------------------------------------------------------------------

/// Create a products screen bound to the fixed catalog endpoint.
///
/// Returns null only if an internal panic occurs. Free with
/// `catalog_screen_free`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_screen_new() -> *mut FfiScreen {
    catch_unwind(|| {
        Box::into_raw(Box::new(FfiScreen {
            inner: ProductsScreen::new(),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a screen. Pending calls stay valid and become no-ops. Safe to call
/// with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_screen_free(screen: *mut FfiScreen) {
    if !screen.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(screen) });
        });
    }
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

/// Replace the title field. Null `text` clears it. Returns false if
/// `screen` is null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_screen_set_title(screen: *const FfiScreen, text: *const c_char) -> bool {
    catch_unwind(|| {
        if screen.is_null() {
            return false;
        }
        let screen = unsafe { &*screen };
        screen.inner.set_title(read_text(text));
        true
    })
    .unwrap_or(false)
}

/// Replace the price field. No validation happens here. Null `text` clears
/// it. Returns false if `screen` is null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_screen_set_price(screen: *const FfiScreen, text: *const c_char) -> bool {
    catch_unwind(|| {
        if screen.is_null() {
            return false;
        }
        let screen = unsafe { &*screen };
        screen.inner.set_price(read_text(text));
        true
    })
    .unwrap_or(false)
}

fn read_text(text: *const c_char) -> String {
    if text.is_null() {
        String::new()
    } else {
        unsafe { from_c_string(text) }
    }
}

// ---------------------------------------------------------------------------
// Starting calls
// ---------------------------------------------------------------------------

/// Start a fetch of the whole catalog; the loading flag is raised until the
/// call completes. Call this on mount and to refresh.
///
/// Returns null if `screen` is null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_screen_begin_fetch(screen: *const FfiScreen) -> *mut FfiPendingCall {
    catch_unwind(|| {
        if screen.is_null() {
            return std::ptr::null_mut();
        }
        let screen = unsafe { &*screen };
        let pending = screen.inner.begin_fetch();
        Box::into_raw(Box::new(FfiPendingCall {
            inner: PendingCall::Fetch(pending),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Start a create from the current form fields.
///
/// Returns null if `screen` is null or a create is already pending (the
/// submit button should be disabled; see `FfiScreenView::can_submit`).
#[unsafe(no_mangle)]
pub extern "C" fn catalog_screen_begin_submit(screen: *const FfiScreen) -> *mut FfiPendingCall {
    catch_unwind(|| {
        if screen.is_null() {
            return std::ptr::null_mut();
        }
        let screen = unsafe { &*screen };
        match screen.inner.begin_submit() {
            Some(pending) => Box::into_raw(Box::new(FfiPendingCall {
                inner: PendingCall::Create(pending),
            })),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Pending calls
// ---------------------------------------------------------------------------

/// The request the host must execute for `pending`.
///
/// Returns null if `pending` is null or the request could not be built; in
/// the latter case complete the call with a null response to report it.
/// Free with `catalog_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_pending_request(pending: *const FfiPendingCall) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if pending.is_null() {
            return std::ptr::null_mut();
        }
        let pending = unsafe { &*pending };
        match pending.inner.request() {
            Some(req) => FfiHttpRequest::from_core(req),
            None => std::ptr::null_mut(),
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Finish `pending` with what the host received and consume it.
///
/// Pass a null `response` when no response arrived (connection failure and
/// the like). Any non-2xx status or undecodable body is a failure too.
/// Returns the notification to show; free with `catalog_free_outcome`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_pending_complete(
    pending: *mut FfiPendingCall,
    response: *const FfiHttpResponse,
) -> *mut FfiOutcome {
    if pending.is_null() {
        return FfiOutcome::null_arg("pending");
    }
    catch_unwind(|| {
        let pending = unsafe { Box::from_raw(pending) };
        let outcome = if response.is_null() {
            Err(NetworkError::transport("host reported no response"))
        } else {
            Ok(unsafe { &*response }.to_core())
        };
        FfiOutcome::from_notification(pending.inner.complete(outcome))
    })
    .unwrap_or_else(|_| {
        warn!("panic while completing a pending call");
        FfiOutcome::panic("panic in catalog_pending_complete")
    })
}

/// Abandon `pending` without completing it. Nobody is notified and the list
/// is untouched, but an abandoned create releases the submit guard and an
/// abandoned fetch lowers the loading flag (if it was the latest fetch).
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_pending_free(pending: *mut FfiPendingCall) {
    if !pending.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(pending) });
        });
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Snapshot the screen for rendering. Returns null if `screen` is null.
/// Free with `catalog_free_view`.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_screen_view(screen: *const FfiScreen) -> *mut FfiScreenView {
    catch_unwind(|| {
        if screen.is_null() {
            return std::ptr::null_mut();
        }
        let screen = unsafe { &*screen };
        FfiScreenView::from_core(screen.inner.view())
    })
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiHttpRequest` returned by `catalog_pending_request`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_request(req: *mut FfiHttpRequest) {
    if !req.is_null() {
        let _ = catch_unwind(|| unsafe { FfiHttpRequest::free(req) });
    }
}

/// Free an `FfiOutcome` returned by `catalog_pending_complete`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_outcome(outcome: *mut FfiOutcome) {
    if outcome.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let outcome = unsafe { Box::from_raw(outcome) };
        free_c_string(outcome.title);
        free_c_string(outcome.message);
    });
}

/// Free an `FfiScreenView` returned by `catalog_screen_view`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn catalog_free_view(view: *mut FfiScreenView) {
    if !view.is_null() {
        let _ = catch_unwind(|| unsafe { FfiScreenView::free(view) });
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::{CStr, CString};

    const SHIRT: &str = r#"[{"id":1,"title":"Shirt","price":9.99,"description":"cotton","image":"https://img/shirt.png","category":"men's clothing"}]"#;
    const MUG: &str = r#"{"id":21,"title":"Mug","price":5.5,"description":"A new product","image":"https://img/mug.png","category":"electronics"}"#;

    fn text(ptr: *const c_char) -> String {
        unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string()
    }

    fn complete(pending: *mut FfiPendingCall, status: u16, body: &str) -> *mut FfiOutcome {
        let body = CString::new(body).unwrap();
        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        catalog_pending_complete(pending, &resp)
    }

    fn set_fields(screen: *const FfiScreen, title: &str, price: &str) {
        let title = CString::new(title).unwrap();
        let price = CString::new(price).unwrap();
        assert!(catalog_screen_set_title(screen, title.as_ptr()));
        assert!(catalog_screen_set_price(screen, price.as_ptr()));
    }

    /// Run `f` against a fresh view snapshot.
    fn with_view(screen: *const FfiScreen, f: impl FnOnce(&FfiScreenView)) {
        let view = catalog_screen_view(screen);
        assert!(!view.is_null());
        f(unsafe { &*view });
        catalog_free_view(view);
    }

    #[test]
    fn screen_new_and_free() {
        let screen = catalog_screen_new();
        assert!(!screen.is_null());
        catalog_screen_free(screen);
    }

    #[test]
    fn screen_free_null_is_safe() {
        catalog_screen_free(std::ptr::null_mut());
    }

    #[test]
    fn fetch_request_targets_fixed_endpoint() {
        let screen = catalog_screen_new();
        let pending = catalog_screen_begin_fetch(screen);
        assert!(!pending.is_null());

        let req = catalog_pending_request(pending);
        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Get));
        assert_eq!(text(req_ref.url), "https://fakestoreapi.com/products");
        assert!(req_ref.body.is_null());
        assert_eq!(req_ref.headers_len, 0);

        catalog_free_request(req);
        catalog_pending_free(pending);
        catalog_screen_free(screen);
    }

    #[test]
    fn fetch_success_fills_the_view() {
        let screen = catalog_screen_new();
        let pending = catalog_screen_begin_fetch(screen);
        with_view(screen, |view| assert!(view.loading));

        let outcome = complete(pending, 200, SHIRT);
        let o = unsafe { &*outcome };
        assert_eq!(o.status, FfiStatus::Ok);
        assert_eq!(o.kind, FfiNotificationKind::None);
        assert!(o.message.is_null());
        catalog_free_outcome(outcome);

        with_view(screen, |view| {
            assert!(!view.loading);
            assert_eq!(text(view.heading), "Products");
            assert_eq!(view.cards_len, 1);
            let cards = unsafe { std::slice::from_raw_parts(view.cards, view.cards_len as usize) };
            assert_eq!(cards[0].id, 1);
            assert_eq!(text(cards[0].title), "Shirt");
            assert_eq!(text(cards[0].price_label), "INR₹9.99");
            assert_eq!(text(cards[0].image), "https://img/shirt.png");
        });
        catalog_screen_free(screen);
    }

    #[test]
    fn null_response_is_a_fetch_failure() {
        let screen = catalog_screen_new();
        let pending = catalog_screen_begin_fetch(screen);
        let outcome = catalog_pending_complete(pending, std::ptr::null());
        let o = unsafe { &*outcome };
        assert_eq!(o.kind, FfiNotificationKind::Error);
        assert_eq!(text(o.title), "error");
        assert_eq!(text(o.message), "failed to fetch products");
        catalog_free_outcome(outcome);

        with_view(screen, |view| {
            assert!(!view.loading);
            assert_eq!(view.cards_len, 0);
            assert!(view.cards.is_null());
        });
        catalog_screen_free(screen);
    }

    #[test]
    fn submit_builds_post_and_appends_on_success() {
        let screen = catalog_screen_new();
        set_fields(screen, "Mug", "5.5");

        let pending = catalog_screen_begin_submit(screen);
        assert!(!pending.is_null());
        with_view(screen, |view| {
            assert!(!view.can_submit);
            assert!(!view.loading);
        });

        let req = catalog_pending_request(pending);
        let req_ref = unsafe { &*req };
        assert!(matches!(req_ref.method, FfiHttpMethod::Post));
        assert_eq!(req_ref.headers_len, 1);
        let header = unsafe { &*req_ref.headers };
        assert_eq!(text(header.key), "content-type");
        assert_eq!(text(header.value), "application/json");
        let body: serde_json::Value = serde_json::from_str(&text(req_ref.body)).unwrap();
        assert_eq!(body["title"], "Mug");
        assert_eq!(body["price"], 5.5);
        assert_eq!(body["category"], "electronics");
        catalog_free_request(req);

        let outcome = complete(pending, 200, MUG);
        let o = unsafe { &*outcome };
        assert_eq!(o.kind, FfiNotificationKind::Success);
        assert!(o.title.is_null());
        assert_eq!(text(o.message), "product added successfully!");
        catalog_free_outcome(outcome);

        with_view(screen, |view| {
            assert!(view.can_submit);
            assert_eq!(text(view.title), "");
            assert_eq!(text(view.price), "");
            assert_eq!(view.cards_len, 1);
            let cards = unsafe { std::slice::from_raw_parts(view.cards, view.cards_len as usize) };
            assert_eq!(cards[0].id, 21);
        });
        catalog_screen_free(screen);
    }

    #[test]
    fn failed_submit_keeps_fields() {
        let screen = catalog_screen_new();
        set_fields(screen, "Mug", "5.5");
        let pending = catalog_screen_begin_submit(screen);

        let outcome = complete(pending, 500, "boom");
        let o = unsafe { &*outcome };
        assert_eq!(o.kind, FfiNotificationKind::Error);
        assert_eq!(text(o.message), "could not add product");
        catalog_free_outcome(outcome);

        with_view(screen, |view| {
            assert_eq!(text(view.title), "Mug");
            assert_eq!(text(view.price), "5.5");
            assert_eq!(view.cards_len, 0);
            assert!(view.can_submit);
        });
        catalog_screen_free(screen);
    }

    #[test]
    fn second_submit_is_refused_while_pending() {
        let screen = catalog_screen_new();
        set_fields(screen, "Mug", "5.5");
        let first = catalog_screen_begin_submit(screen);
        assert!(!first.is_null());
        assert!(catalog_screen_begin_submit(screen).is_null());

        catalog_free_outcome(complete(first, 200, MUG));
        let again = catalog_screen_begin_submit(screen);
        assert!(!again.is_null());

        catalog_pending_free(again);
        with_view(screen, |view| assert!(view.can_submit));
        catalog_screen_free(screen);
    }

    #[test]
    fn freeing_a_pending_create_reenables_submit() {
        let screen = catalog_screen_new();
        set_fields(screen, "Mug", "5.5");
        let pending = catalog_screen_begin_submit(screen);
        assert!(!pending.is_null());
        with_view(screen, |view| assert!(!view.can_submit));

        catalog_pending_free(pending);
        with_view(screen, |view| {
            assert!(view.can_submit);
            assert_eq!(text(view.title), "Mug");
        });
        let again = catalog_screen_begin_submit(screen);
        assert!(!again.is_null());

        catalog_pending_free(again);
        catalog_screen_free(screen);
    }

    #[test]
    fn freeing_a_pending_fetch_stops_loading() {
        let screen = catalog_screen_new();
        let pending = catalog_screen_begin_fetch(screen);
        with_view(screen, |view| assert!(view.loading));

        catalog_pending_free(pending);
        with_view(screen, |view| {
            assert!(!view.loading);
            assert_eq!(view.cards_len, 0);
        });
        catalog_screen_free(screen);
    }

    #[test]
    fn freeing_a_pending_call_after_screen_free_is_safe() {
        let screen = catalog_screen_new();
        set_fields(screen, "Mug", "5.5");
        let pending = catalog_screen_begin_submit(screen);
        catalog_screen_free(screen);
        catalog_pending_free(pending);
    }

    #[test]
    fn completing_after_screen_free_is_a_no_op() {
        let screen = catalog_screen_new();
        let pending = catalog_screen_begin_fetch(screen);
        catalog_screen_free(screen);

        let outcome = complete(pending, 200, SHIRT);
        let o = unsafe { &*outcome };
        assert_eq!(o.status, FfiStatus::Ok);
        assert_eq!(o.kind, FfiNotificationKind::None);
        catalog_free_outcome(outcome);
    }

    #[test]
    fn null_text_clears_a_field() {
        let screen = catalog_screen_new();
        set_fields(screen, "Mug", "5.5");
        assert!(catalog_screen_set_title(screen, std::ptr::null()));
        with_view(screen, |view| {
            assert_eq!(text(view.title), "");
            assert_eq!(text(view.price), "5.5");
        });
        catalog_screen_free(screen);
    }

    #[test]
    fn null_screen_is_rejected_everywhere() {
        let t = CString::new("x").unwrap();
        assert!(!catalog_screen_set_title(std::ptr::null(), t.as_ptr()));
        assert!(!catalog_screen_set_price(std::ptr::null(), t.as_ptr()));
        assert!(catalog_screen_begin_fetch(std::ptr::null()).is_null());
        assert!(catalog_screen_begin_submit(std::ptr::null()).is_null());
        assert!(catalog_screen_view(std::ptr::null()).is_null());
        assert!(catalog_pending_request(std::ptr::null()).is_null());
    }

    #[test]
    fn complete_null_pending_returns_null_arg() {
        let outcome = catalog_pending_complete(std::ptr::null_mut(), std::ptr::null());
        let o = unsafe { &*outcome };
        assert_eq!(o.status, FfiStatus::NullArg);
        assert_eq!(text(o.message), "null argument: pending");
        catalog_free_outcome(outcome);
    }

    #[test]
    fn free_functions_accept_null() {
        catalog_free_request(std::ptr::null_mut());
        catalog_free_outcome(std::ptr::null_mut());
        catalog_free_view(std::ptr::null_mut());
        catalog_pending_free(std::ptr::null_mut());
    }
}
