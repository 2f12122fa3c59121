//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointer + length instead of `Vec`,
//! and enums with explicit discriminants. Conversions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use catalog_core::{HttpMethod, HttpRequest, HttpResponse, Notification, PendingCreate, PendingFetch, ScreenView};

/// Opaque handle to a `ProductsScreen`.
pub struct FfiScreen {
    pub(crate) inner: catalog_core::ProductsScreen,
}

/// Opaque handle to an in-flight fetch or create.
pub struct FfiPendingCall {
    pub(crate) inner: PendingCall,
}

pub(crate) enum PendingCall {
    Fetch(PendingFetch),
    Create(PendingCreate),
}

impl PendingCall {
    pub(crate) fn request(&self) -> Option<&HttpRequest> {
        match self {
            PendingCall::Fetch(pending) => Some(pending.request()),
            PendingCall::Create(pending) => pending.request(),
        }
    }

    pub(crate) fn complete(
        self,
        outcome: Result<HttpResponse, catalog_core::NetworkError>,
    ) -> Option<Notification> {
        match self {
            PendingCall::Fetch(pending) => pending.complete(outcome),
            PendingCall::Create(pending) => pending.complete(outcome),
        }
    }
}

/// Copy a Rust string into a heap C string owned by the caller. Interior
/// NULs cannot cross the boundary and are dropped.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    CString::new(s.replace('\0', "")).unwrap_or_default().into_raw()
}

/// Read a caller-owned C string. Invalid UTF-8 is replaced, not rejected.
///
/// # Safety
/// `ptr` must be non-null and point to a NUL-terminated string.
pub(crate) unsafe fn from_c_string(ptr: *const c_char) -> String {
    unsafe { CStr::from_ptr(ptr) }.to_string_lossy().into_owned()
}

/// Release a string produced by `to_c_string`. Null is ignored.
pub(crate) fn free_c_string(ptr: *mut c_char) {
    if !ptr.is_null() {
        drop(unsafe { CString::from_raw(ptr) });
    }
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
        }
    }
}

#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request for the host to execute.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: &HttpRequest) -> *mut Self {
        let body = match &req.body {
            Some(b) => to_c_string(b),
            None => std::ptr::null_mut(),
        };

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Box<[FfiHeader]> = req
                .headers
                .iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url: to_c_string(&req.url),
            headers,
            headers_len,
            body,
        }))
    }

    /// Release everything `from_core` allocated.
    ///
    /// # Safety
    /// `req` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(req: *mut Self) {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// The response the host received. The FFI layer reads but never frees it.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

impl FfiHttpResponse {
    pub(crate) fn to_core(&self) -> HttpResponse {
        let body = if self.body.is_null() {
            String::new()
        } else {
            unsafe { from_c_string(self.body) }
        };
        HttpResponse::new(self.status, body)
    }
}

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

/// Whether the call itself was accepted.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    NullArg = 1,
    Panic = 2,
}

/// Which notification, if any, the host must show.
#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiNotificationKind {
    None = 0,
    /// Blocking alert dialog.
    Error = 1,
    /// Short toast.
    Success = 2,
}

/// Result of completing a pending call.
///
/// `title` is null unless `kind` is `Error`; `message` is null when `kind`
/// is `None` and `status` is `Ok`.
#[repr(C)]
pub struct FfiOutcome {
    pub status: FfiStatus,
    pub kind: FfiNotificationKind,
    pub title: *mut c_char,
    pub message: *mut c_char,
}

impl FfiOutcome {
    pub(crate) fn from_notification(notification: Option<Notification>) -> *mut Self {
        let (kind, title, message) = match notification {
            None => (FfiNotificationKind::None, std::ptr::null_mut(), std::ptr::null_mut()),
            Some(Notification::Error { title, message }) => (
                FfiNotificationKind::Error,
                to_c_string(&title),
                to_c_string(&message),
            ),
            Some(Notification::Success { message }) => (
                FfiNotificationKind::Success,
                std::ptr::null_mut(),
                to_c_string(&message),
            ),
        };
        Box::into_raw(Box::new(FfiOutcome {
            status: FfiStatus::Ok,
            kind,
            title,
            message,
        }))
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failed(FfiStatus::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failed(FfiStatus::Panic, msg)
    }

    fn failed(status: FfiStatus, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiOutcome {
            status,
            kind: FfiNotificationKind::None,
            title: std::ptr::null_mut(),
            message: to_c_string(msg),
        }))
    }
}

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct FfiProductCard {
    pub id: u64,
    pub title: *mut c_char,
    pub image: *mut c_char,
    pub price_label: *mut c_char,
}

/// Snapshot of the whole screen. Cards are in list order.
#[repr(C)]
pub struct FfiScreenView {
    pub heading: *mut c_char,
    pub loading: bool,
    pub can_submit: bool,
    pub title: *mut c_char,
    pub price: *mut c_char,
    pub cards: *mut FfiProductCard,
    pub cards_len: u32,
}

impl FfiScreenView {
    pub(crate) fn from_core(view: ScreenView) -> *mut Self {
        let cards_len = view.cards.len() as u32;
        let cards = if view.cards.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_cards: Box<[FfiProductCard]> = view
                .cards
                .iter()
                .map(|card| FfiProductCard {
                    id: card.id,
                    title: to_c_string(&card.title),
                    image: to_c_string(&card.image),
                    price_label: to_c_string(&card.price_label),
                })
                .collect();
            Box::into_raw(ffi_cards) as *mut FfiProductCard
        };

        Box::into_raw(Box::new(FfiScreenView {
            heading: to_c_string(&view.heading),
            loading: view.loading,
            can_submit: view.can_submit,
            title: to_c_string(&view.title),
            price: to_c_string(&view.price),
            cards,
            cards_len,
        }))
    }

    /// # Safety
    /// `view` must come from `from_core` and not have been freed.
    pub(crate) unsafe fn free(view: *mut Self) {
        let view = unsafe { Box::from_raw(view) };
        free_c_string(view.heading);
        free_c_string(view.title);
        free_c_string(view.price);
        if !view.cards.is_null() && view.cards_len > 0 {
            let cards = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    view.cards,
                    view.cards_len as usize,
                ))
            };
            for card in cards.iter() {
                free_c_string(card.title);
                free_c_string(card.image);
                free_c_string(card.price_label);
            }
        }
    }
}
