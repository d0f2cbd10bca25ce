//! C-ABI wrapper around `posts-core`.
//!
//! # Overview
//! Exposes the list/detail coordinator through `extern "C"` functions so a
//! mobile shell (Swift, Kotlin via JNI, plain C) can drive it. The shell
//! performs every HTTP round-trip itself and reports results back by token.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - Navigation calls return an `FfiEffectList`; the shell executes each
//!   `Fetch` and calls `posts_coordinator_resolve` with the same token.
//! - The caller owns all returned pointers and must release them with the
//!   matching `posts_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use posts_core::{
    CoordinatorConfig, FetchError, HttpResponse, PostsClient, RequestToken, ViewCoordinator,
};

use types::*;

// ---------------------------------------------------------------------------
// Coordinator lifecycle
// ---------------------------------------------------------------------------

/// Create a coordinator talking to `base_url`.
///
/// Returns null if `base_url` is null or not UTF-8, or if an internal panic
/// occurs. The caller must free the returned pointer with
/// `posts_coordinator_free`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_new(
    base_url: *const c_char,
    back_navigation: bool,
) -> *mut FfiCoordinator {
    catch_unwind(|| {
        if base_url.is_null() {
            return std::ptr::null_mut();
        }
        let Ok(url) = unsafe { CStr::from_ptr(base_url) }.to_str() else {
            return std::ptr::null_mut();
        };
        let coordinator = ViewCoordinator::new(
            PostsClient::new(url),
            CoordinatorConfig { back_navigation },
        );
        Box::into_raw(Box::new(FfiCoordinator { inner: coordinator }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a coordinator created by `posts_coordinator_new`. Safe to call with
/// null. Does not emit cancel effects; call `posts_coordinator_teardown`
/// first if the shell needs them.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_free(coordinator: *mut FfiCoordinator) {
    if !coordinator.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(coordinator) });
        }));
    }
}

/// Run `f` against the coordinator, mapping null and panics to error lists.
fn with_coordinator(
    coordinator: *mut FfiCoordinator,
    name: &str,
    f: impl FnOnce(&mut ViewCoordinator) -> *mut FfiEffectList,
) -> *mut FfiEffectList {
    if coordinator.is_null() {
        return FfiEffectList::null_arg("coordinator");
    }
    catch_unwind(AssertUnwindSafe(|| {
        let coordinator = unsafe { &mut *coordinator };
        f(&mut coordinator.inner)
    }))
    .unwrap_or_else(|_| FfiEffectList::panic(&format!("panic in {name}")))
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// Dispatch the collection fetch. Only the first call yields an effect.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_mount(coordinator: *mut FfiCoordinator) -> *mut FfiEffectList {
    with_coordinator(coordinator, "posts_coordinator_mount", |c| {
        FfiEffectList::ok(c.mount().into_iter().collect())
    })
}

/// Show the detail view for `id`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_select(
    coordinator: *mut FfiCoordinator,
    id: u64,
) -> *mut FfiEffectList {
    with_coordinator(coordinator, "posts_coordinator_select", |c| {
        FfiEffectList::ok(c.select(id))
    })
}

/// Return to the list. Fails with `BackNavigationDisabled` unless the
/// coordinator was created with `back_navigation = true`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_back(coordinator: *mut FfiCoordinator) -> *mut FfiEffectList {
    with_coordinator(coordinator, "posts_coordinator_back", |c| match c.back() {
        Ok(effects) => FfiEffectList::ok(effects),
        Err(e) => FfiEffectList::from_navigation_error(e),
    })
}

/// Cancel everything outstanding. Results arriving afterwards are dropped.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_teardown(
    coordinator: *mut FfiCoordinator,
) -> *mut FfiEffectList {
    with_coordinator(coordinator, "posts_coordinator_teardown", |c| {
        FfiEffectList::ok(c.teardown())
    })
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Read the C response into a core `HttpResponse`. A null or non-UTF-8 body is
/// read as empty, which the core then rejects as undecodable.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }
            .to_str()
            .unwrap_or("")
            .to_string()
    };
    HttpResponse::new(resp.status, body)
}

/// Report the HTTP response for the fetch dispatched with `token`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_resolve(
    coordinator: *mut FfiCoordinator,
    token: u64,
    response: *const FfiHttpResponse,
) -> FfiResolution {
    if coordinator.is_null() || response.is_null() {
        return FfiResolution::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let coordinator = unsafe { &mut *coordinator };
        let response = ffi_response_to_core(unsafe { &*response });
        FfiResolution::from(coordinator.inner.resolve(RequestToken::new(token), Ok(response)))
    }))
    .unwrap_or(FfiResolution::Panic)
}

/// Report that the fetch dispatched with `token` never got a response.
/// `message` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_resolve_transport_error(
    coordinator: *mut FfiCoordinator,
    token: u64,
    message: *const c_char,
) -> FfiResolution {
    if coordinator.is_null() {
        return FfiResolution::NullArg;
    }
    catch_unwind(AssertUnwindSafe(|| {
        let coordinator = unsafe { &mut *coordinator };
        let message = if message.is_null() {
            "transport error".to_string()
        } else {
            unsafe { CStr::from_ptr(message) }.to_string_lossy().into_owned()
        };
        FfiResolution::from(
            coordinator
                .inner
                .resolve(RequestToken::new(token), Err(FetchError::Transport(message))),
        )
    }))
    .unwrap_or(FfiResolution::Panic)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// Build the view for the current state. Returns null if `coordinator` is
/// null. Free with `posts_free_view`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_coordinator_render(coordinator: *mut FfiCoordinator) -> *mut FfiView {
    if coordinator.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(AssertUnwindSafe(|| {
        let coordinator = unsafe { &mut *coordinator };
        let status = FfiCollectionStatus::from(coordinator.inner.collection());
        FfiView::from_core(coordinator.inner.render(), status)
    }))
    .unwrap_or(std::ptr::null_mut())
}

// ---------------------------------------------------------------------------
// Cancellation handles
// ---------------------------------------------------------------------------

/// Whether the fetch behind `handle` has been cancelled. Null reads as
/// cancelled.
#[unsafe(no_mangle)]
pub extern "C" fn posts_cancel_is_set(handle: *const FfiCancelHandle) -> bool {
    if handle.is_null() {
        return true;
    }
    catch_unwind(|| unsafe { &*handle }.inner.is_cancelled()).unwrap_or(true)
}

/// Take a separately owned copy of a handle so it can outlive its effect
/// list. Free with `posts_cancel_handle_free`.
#[unsafe(no_mangle)]
pub extern "C" fn posts_cancel_handle_retain(
    handle: *const FfiCancelHandle,
) -> *mut FfiCancelHandle {
    if handle.is_null() {
        return std::ptr::null_mut();
    }
    catch_unwind(|| {
        let inner = unsafe { &*handle }.inner.clone();
        Box::into_raw(Box::new(FfiCancelHandle { inner }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a handle from `posts_cancel_handle_retain`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_cancel_handle_free(handle: *mut FfiCancelHandle) {
    if !handle.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(handle) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free an `FfiEffectList`. Safe to call with null. Handles embedded in the
/// effects are freed too; retain them first if they must outlive the list.
#[unsafe(no_mangle)]
pub extern "C" fn posts_free_effects(list: *mut FfiEffectList) {
    if list.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let list = unsafe { Box::from_raw(list) };
        if !list.error_message.is_null() {
            drop(unsafe { CString::from_raw(list.error_message) });
        }
        for effect in unsafe { from_raw_parts(list.items, list.len) } {
            free_effect_fields(&effect);
        }
    }));
}

/// Free an `FfiView`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn posts_free_view(view: *mut FfiView) {
    if view.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| {
        let view = unsafe { Box::from_raw(view) };
        if !view.text.is_null() {
            drop(unsafe { CString::from_raw(view.text) });
        }
        for entry in unsafe { from_raw_parts(view.entries, view.entries_len) } {
            if !entry.key.is_null() {
                drop(unsafe { CString::from_raw(entry.key) });
            }
            if !entry.label.is_null() {
                drop(unsafe { CString::from_raw(entry.label) });
            }
        }
    }));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
