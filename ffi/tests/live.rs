//! Drive the C API end-to-end against the live mock server, acting as the
//! mobile shell: execute each fetch effect with ureq and report back by token.

use std::ffi::{CStr, CString};

use posts_ffi::types::{FfiEffectKind, FfiHttpResponse, FfiResolution, FfiViewKind};
use posts_ffi::*;

fn spawn_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

/// Execute every fetch in `list`, resolve it, and free the list.
fn execute_all(
    coordinator: *mut posts_ffi::types::FfiCoordinator,
    list: *mut posts_ffi::types::FfiEffectList,
) -> Vec<FfiResolution> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let l = unsafe { &*list };
    let items = if l.items.is_null() {
        &[][..]
    } else {
        unsafe { std::slice::from_raw_parts(l.items, l.len as usize) }
    };

    let mut resolutions = Vec::new();
    for effect in items {
        if effect.kind != FfiEffectKind::Fetch || posts_cancel_is_set(effect.cancel) {
            continue;
        }
        let url = unsafe { CStr::from_ptr(effect.url) }.to_str().unwrap();
        let mut response = agent.get(url).call().expect("HTTP transport error");
        let status = response.status().as_u16();
        let body = CString::new(response.body_mut().read_to_string().unwrap_or_default()).unwrap();
        let resp = FfiHttpResponse {
            status,
            body: body.as_ptr(),
        };
        resolutions.push(posts_coordinator_resolve(coordinator, effect.token, &resp));
    }
    posts_free_effects(list);
    resolutions
}

#[test]
fn shell_drives_list_and_detail() {
    let addr = spawn_server();
    let url = CString::new(format!("http://{addr}")).unwrap();
    let coordinator = posts_coordinator_new(url.as_ptr(), true);
    assert!(!coordinator.is_null());

    // Mount: list of ten posts.
    let resolutions = execute_all(coordinator, posts_coordinator_mount(coordinator));
    assert_eq!(resolutions, vec![FfiResolution::Applied]);
    let view = posts_coordinator_render(coordinator);
    let v = unsafe { &*view };
    assert_eq!(v.kind, FfiViewKind::List);
    assert_eq!(v.entries_len, 10);
    posts_free_view(view);

    // Select: detail for post 3.
    let resolutions = execute_all(coordinator, posts_coordinator_select(coordinator, 3));
    assert_eq!(resolutions, vec![FfiResolution::Applied]);
    let view = posts_coordinator_render(coordinator);
    let v = unsafe { &*view };
    assert_eq!(v.kind, FfiViewKind::Detail);
    assert_eq!(unsafe { CStr::from_ptr(v.text) }.to_str().unwrap(), "3: post 3");
    posts_free_view(view);

    // Unknown post: 404 keeps the loading view.
    let resolutions = execute_all(coordinator, posts_coordinator_select(coordinator, 77));
    assert_eq!(resolutions, vec![FfiResolution::Failed]);
    let view = posts_coordinator_render(coordinator);
    assert_eq!(unsafe { &*view }.kind, FfiViewKind::Loading);
    posts_free_view(view);

    // Back to the list.
    let list = posts_coordinator_back(coordinator);
    assert!(execute_all(coordinator, list).is_empty());
    let view = posts_coordinator_render(coordinator);
    assert_eq!(unsafe { &*view }.kind, FfiViewKind::List);
    posts_free_view(view);

    posts_free_effects(posts_coordinator_teardown(coordinator));
    posts_coordinator_free(coordinator);
}
