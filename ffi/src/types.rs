//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, pointer + length instead of `Vec`, and
//! tagged enums with explicit discriminants. Conversions live here so `lib.rs`
//! stays focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use posts_core::{
    CancelHandle, CollectionState, Effect, HttpMethod, NavigationError, Resolution, View,
    ViewCoordinator,
};

/// Opaque handle to a `ViewCoordinator`. C callers receive a pointer to this
/// and pass it back into every `posts_coordinator_*` function.
pub struct FfiCoordinator {
    pub(crate) inner: ViewCoordinator,
}

/// Opaque cancellation flag for one dispatched fetch.
pub struct FfiCancelHandle {
    pub(crate) inner: CancelHandle,
}

/// Copy `s` into a heap C string. Interior NULs are dropped rather than
/// failing, since post titles come from a remote server.
pub(crate) fn to_c_string(s: &str) -> *mut c_char {
    let cleaned: String = s.chars().filter(|c| *c != '\0').collect();
    CString::new(cleaned).unwrap_or_default().into_raw()
}

/// Move a vector to the heap as pointer + length. Empty vectors become null.
pub(crate) fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let boxed = items.into_boxed_slice();
    let len = boxed.len() as u32;
    (Box::into_raw(boxed) as *mut T, len)
}

/// Reclaim a vector produced by `into_raw_parts`.
///
/// # Safety
/// `ptr` and `len` must come from a single `into_raw_parts` call.
pub(crate) unsafe fn from_raw_parts<T>(ptr: *mut T, len: u32) -> Vec<T> {
    if ptr.is_null() || len == 0 {
        return Vec::new();
    }
    let slice = std::ptr::slice_from_raw_parts_mut(ptr, len as usize);
    unsafe { Box::from_raw(slice) }.into_vec()
}

// ---------------------------------------------------------------------------
// Effects
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiEffectKind {
    Fetch = 0,
    Cancel = 1,
}

/// One instruction for the host.
///
/// For `Fetch`, `url`/`headers` describe the GET to perform and `cancel` is a
/// flag the host may poll; for `Cancel`, those fields are null and the host
/// should abandon the fetch dispatched with `token`.
#[repr(C)]
pub struct FfiEffect {
    pub kind: FfiEffectKind,
    pub token: u64,
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub cancel: *mut FfiCancelHandle,
}

impl FfiEffect {
    fn from_core(effect: Effect) -> Self {
        match effect {
            Effect::Fetch {
                token,
                request,
                cancel,
            } => {
                let headers = request
                    .headers
                    .iter()
                    .map(|(k, v)| FfiHeader {
                        key: to_c_string(k),
                        value: to_c_string(v),
                    })
                    .collect();
                let (headers, headers_len) = into_raw_parts(headers);
                FfiEffect {
                    kind: FfiEffectKind::Fetch,
                    token: token.value(),
                    method: request.method.into(),
                    url: to_c_string(&request.url),
                    headers,
                    headers_len,
                    cancel: Box::into_raw(Box::new(FfiCancelHandle { inner: cancel })),
                }
            }
            Effect::Cancel { token } => FfiEffect {
                kind: FfiEffectKind::Cancel,
                token: token.value(),
                method: FfiHttpMethod::Get,
                url: std::ptr::null_mut(),
                headers: std::ptr::null_mut(),
                headers_len: 0,
                cancel: std::ptr::null_mut(),
            },
        }
    }
}

/// Error codes for coordinator calls.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NullArg = 1,
    Panic = 2,
    BackNavigationDisabled = 3,
    AlreadyAtList = 4,
}

impl From<NavigationError> for FfiErrorCode {
    fn from(err: NavigationError) -> Self {
        match err {
            NavigationError::BackNavigationDisabled => FfiErrorCode::BackNavigationDisabled,
            NavigationError::AlreadyAtList => FfiErrorCode::AlreadyAtList,
        }
    }
}

/// Effects returned by `mount`, `select`, `back` and `teardown`.
///
/// On failure `error_code` is set, `error_message` is a C string and the list
/// is empty.
#[repr(C)]
pub struct FfiEffectList {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub items: *mut FfiEffect,
    pub len: u32,
}

impl FfiEffectList {
    pub(crate) fn ok(effects: Vec<Effect>) -> *mut Self {
        let items = effects.into_iter().map(FfiEffect::from_core).collect();
        let (items, len) = into_raw_parts(items);
        Box::into_raw(Box::new(FfiEffectList {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            items,
            len,
        }))
    }

    pub(crate) fn error(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiEffectList {
            error_code,
            error_message: to_c_string(msg),
            items: std::ptr::null_mut(),
            len: 0,
        }))
    }

    pub(crate) fn from_navigation_error(err: NavigationError) -> *mut Self {
        Self::error(err.into(), &err.to_string())
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::error(FfiErrorCode::NullArg, &format!("null argument: {name}"))
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::error(FfiErrorCode::Panic, msg)
    }
}

/// Release every heap field owned by an effect (but not the effect itself).
pub(crate) fn free_effect_fields(effect: &FfiEffect) {
    if !effect.url.is_null() {
        drop(unsafe { CString::from_raw(effect.url) });
    }
    for header in unsafe { from_raw_parts(effect.headers, effect.headers_len) } {
        if !header.key.is_null() {
            drop(unsafe { CString::from_raw(header.key) });
        }
        if !header.value.is_null() {
            drop(unsafe { CString::from_raw(header.value) });
        }
    }
    if !effect.cancel.is_null() {
        drop(unsafe { Box::from_raw(effect.cancel) });
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host builds this on its own stack; the FFI layer reads but never frees
/// these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

/// Outcome of `posts_coordinator_resolve*`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiResolution {
    Applied = 0,
    Failed = 1,
    Stale = 2,
    Cancelled = 3,
    Unknown = 4,
    NullArg = 5,
    Panic = 6,
}

impl From<Resolution> for FfiResolution {
    fn from(r: Resolution) -> Self {
        match r {
            Resolution::Applied => FfiResolution::Applied,
            Resolution::Failed(_) => FfiResolution::Failed,
            Resolution::Stale => FfiResolution::Stale,
            Resolution::Cancelled => FfiResolution::Cancelled,
            Resolution::Unknown => FfiResolution::Unknown,
        }
    }
}

// ---------------------------------------------------------------------------
// View
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiViewKind {
    List = 0,
    Loading = 1,
    Detail = 2,
}

/// Where the collection fetch stands, so hosts can tell "no posts" from
/// "could not load posts".
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiCollectionStatus {
    Idle = 0,
    Loading = 1,
    Loaded = 2,
    Failed = 3,
}

impl From<&CollectionState> for FfiCollectionStatus {
    fn from(state: &CollectionState) -> Self {
        match state {
            CollectionState::Idle => FfiCollectionStatus::Idle,
            CollectionState::Loading { .. } => FfiCollectionStatus::Loading,
            CollectionState::Loaded(_) => FfiCollectionStatus::Loaded,
            CollectionState::Failed(_) => FfiCollectionStatus::Failed,
        }
    }
}

/// One row of the list view.
#[repr(C)]
pub struct FfiListEntry {
    pub id: u64,
    pub key: *mut c_char,
    pub label: *mut c_char,
}

/// The screen to draw.
///
/// `List` fills `entries`; `Loading` sets `id`; `Detail` sets `id` and
/// `text`. Unused pointer fields are null.
#[repr(C)]
pub struct FfiView {
    pub kind: FfiViewKind,
    pub collection_status: FfiCollectionStatus,
    pub id: u64,
    pub text: *mut c_char,
    pub entries: *mut FfiListEntry,
    pub entries_len: u32,
}

impl FfiView {
    pub(crate) fn from_core(view: View, status: FfiCollectionStatus) -> *mut Self {
        let ffi_view = match view {
            View::List { entries } => {
                let entries = entries
                    .iter()
                    .map(|e| FfiListEntry {
                        id: e.id,
                        key: to_c_string(&e.key),
                        label: to_c_string(&e.label),
                    })
                    .collect();
                let (entries, entries_len) = into_raw_parts(entries);
                FfiView {
                    kind: FfiViewKind::List,
                    collection_status: status,
                    id: 0,
                    text: std::ptr::null_mut(),
                    entries,
                    entries_len,
                }
            }
            View::Loading { id } => FfiView {
                kind: FfiViewKind::Loading,
                collection_status: status,
                id,
                text: std::ptr::null_mut(),
                entries: std::ptr::null_mut(),
                entries_len: 0,
            },
            View::Detail { id, text } => FfiView {
                kind: FfiViewKind::Detail,
                collection_status: status,
                id,
                text: to_c_string(&text),
                entries: std::ptr::null_mut(),
                entries_len: 0,
            },
        };
        Box::into_raw(Box::new(ffi_view))
    }
}
