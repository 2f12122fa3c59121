//! The products screen: both state containers plus the calls that drive them.
//!
//! # Design
//! Every network operation is one logical flow split at its I/O point:
//! `begin_*` mutates state and hands out a pending call carrying the
//! `HttpRequest`; the host executes it however it likes; `complete` parses
//! the response and applies it. `refresh`/`submit` run the same flow on a
//! blocking `Transport`.
//!
//! Pending calls hold only a `Weak` reference to the screen. Completing one
//! after the screen is gone is a silent no-op, so a host that tears the
//! screen down mid-request cannot write into freed state. Dropping one
//! without completing it lowers the loading flag or the submit guard it
//! raised.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use tracing::debug;

use crate::client::CatalogClient;
use crate::error::NetworkError;
use crate::form::FormState;
use crate::http::{HttpRequest, HttpResponse};
use crate::list::{FetchTicket, ProductListState};
use crate::notify::{Notification, Notifier};
use crate::transport::Transport;
use crate::types::Product;
use crate::view::ScreenView;

#[derive(Debug, Default)]
struct ScreenState {
    list: ProductListState,
    form: FormState,
}

fn lock(state: &Mutex<ScreenState>) -> MutexGuard<'_, ScreenState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug, Default)]
pub struct ProductsScreen {
    state: Arc<Mutex<ScreenState>>,
    client: CatalogClient,
}

impl ProductsScreen {
    /// A screen bound to the fixed catalog endpoint.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(client: CatalogClient) -> Self {
        Self {
            state: Arc::default(),
            client,
        }
    }

    pub fn client(&self) -> &CatalogClient {
        &self.client
    }

    pub fn set_title(&self, text: impl Into<String>) {
        lock(&self.state).form.set_title(text);
    }

    pub fn set_price(&self, text: impl Into<String>) {
        lock(&self.state).form.set_price(text);
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).list.is_loading()
    }

    pub fn products(&self) -> Vec<Product> {
        lock(&self.state).list.products().to_vec()
    }

    pub fn view(&self) -> ScreenView {
        let state = lock(&self.state);
        ScreenView::capture(&state.list, &state.form)
    }

    /// Start a fetch: the loading flag goes up until the returned call
    /// completes or is dropped.
    pub fn begin_fetch(&self) -> PendingFetch {
        let ticket = lock(&self.state).list.begin_fetch();
        PendingFetch {
            ticket,
            request: self.client.build_list_products(),
            client: self.client.clone(),
            screen: Arc::downgrade(&self.state),
            settled: false,
        }
    }

    /// Start a create from the current form fields. `None` while another
    /// create is still pending.
    pub fn begin_submit(&self) -> Option<PendingCreate> {
        let draft = lock(&self.state).form.begin_submit()?;
        Some(PendingCreate {
            request: self.client.build_create_product(&draft),
            client: self.client.clone(),
            screen: Arc::downgrade(&self.state),
            settled: false,
        })
    }

    /// Initial load when the screen appears.
    pub fn mount<T, N>(&self, transport: &T, notifier: &N)
    where
        T: Transport + ?Sized,
        N: Notifier + ?Sized,
    {
        self.refresh(transport, notifier);
    }

    pub fn refresh<T, N>(&self, transport: &T, notifier: &N)
    where
        T: Transport + ?Sized,
        N: Notifier + ?Sized,
    {
        let pending = self.begin_fetch();
        let outcome = transport.execute(pending.request());
        if let Some(notification) = pending.complete(outcome) {
            notifier.notify(notification);
        }
    }

    /// Run one create. Returns `false` when a create was already pending and
    /// nothing was sent.
    pub fn submit<T, N>(&self, transport: &T, notifier: &N) -> bool
    where
        T: Transport + ?Sized,
        N: Notifier + ?Sized,
    {
        let Some(pending) = self.begin_submit() else {
            return false;
        };
        let outcome = match pending.request() {
            Some(request) => transport.execute(request),
            None => Err(NetworkError::transport("request was not built")),
        };
        if let Some(notification) = pending.complete(outcome) {
            notifier.notify(notification);
        }
        true
    }
}

/// An in-flight list request.
///
/// Dropping it without `complete` abandons the fetch: loading clears if it
/// was the latest one.
#[derive(Debug)]
pub struct PendingFetch {
    ticket: FetchTicket,
    request: HttpRequest,
    client: CatalogClient,
    screen: Weak<Mutex<ScreenState>>,
    settled: bool,
}

impl PendingFetch {
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Apply the transport outcome. `Err` means no response was received.
    pub fn complete(mut self, outcome: Result<HttpResponse, NetworkError>) -> Option<Notification> {
        self.settled = true;
        let Some(state) = self.screen.upgrade() else {
            debug!("screen dropped before fetch completed");
            return None;
        };
        let result = outcome.and_then(|response| self.client.parse_list_products(response));
        let mut guard = lock(&state);
        guard.list.complete_fetch(self.ticket, result)
    }
}

impl Drop for PendingFetch {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Some(state) = self.screen.upgrade() {
            lock(&state).list.abandon_fetch(self.ticket);
        }
    }
}

/// An in-flight create request.
///
/// Dropping it without `complete` abandons the create and releases the
/// submit guard; the form fields are kept.
#[derive(Debug)]
pub struct PendingCreate {
    request: Result<HttpRequest, NetworkError>,
    client: CatalogClient,
    screen: Weak<Mutex<ScreenState>>,
    settled: bool,
}

impl PendingCreate {
    /// `None` when the payload could not be encoded. The call must still be
    /// completed so the failure reaches the user.
    pub fn request(&self) -> Option<&HttpRequest> {
        self.request.as_ref().ok()
    }

    /// Apply the transport outcome and return the notification to show.
    /// `None` only when the screen is already gone.
    pub fn complete(mut self, outcome: Result<HttpResponse, NetworkError>) -> Option<Notification> {
        self.settled = true;
        let Some(state) = self.screen.upgrade() else {
            debug!("screen dropped before create completed");
            return None;
        };
        let request = std::mem::replace(
            &mut self.request,
            Err(NetworkError::transport("request already consumed")),
        );
        let result = request
            .and(outcome)
            .and_then(|response| self.client.parse_create_product(response));
        let mut guard = lock(&state);
        let ScreenState { list, form } = &mut *guard;
        Some(form.complete_submit(result, list))
    }
}

impl Drop for PendingCreate {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        if let Some(state) = self.screen.upgrade() {
            lock(&state).form.abandon_submit();
        }
    }
}
