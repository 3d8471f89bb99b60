//! windows wrapping and mock messaging shim.
//!
//! The windows build runs in the main world and talks to the host through
//! the WebView2 interop globals (`windowsInteropPostMessage` /
//! `windowsInteropAddEventListener`), so wrapping leaves the script at top
//! level and the mock shim provides those globals.

// ============================================================================
// Public Functions
// ============================================================================

/// Wraps a resolved artifact for the windows build.
#[must_use]
pub(crate) fn wrap(resolved: &str) -> String {
    WINDOWS_WRAPPER_TEMPLATE.replace("$ARTIFACT_SOURCE", resolved)
}

/// Renders the windows interop mock messaging shim.
///
/// `install_json` is the serialized install payload. Calls posted through
/// the interop global are captured into the in-page log; registered methods
/// are answered by dispatching a response event, unregistered methods are
/// dropped without one.
#[must_use]
pub(crate) fn mock_host_script(install_json: &str) -> String {
    WINDOWS_MOCK_TEMPLATE.replace("$INSTALL_JSON", install_json)
}

// ============================================================================
// Templates
// ============================================================================

/// Main-world prologue for the windows build.
const WINDOWS_WRAPPER_TEMPLATE: &str = r#""use strict";
$ARTIFACT_SOURCE
"#;

/// Mock WebView2 interop installation.
const WINDOWS_MOCK_TEMPLATE: &str = r#"(() => {
    "use strict";
    const install = $INSTALL_JSON;
    const { messagingContext, responses } = install;
    const listeners = [];
    window.__outgoingMessages = window.__outgoingMessages || [];
    window.windowsInteropAddEventListener = (_name, listener) => {
        listeners.push(listener);
    };
    window.windowsInteropRemoveEventListener = (_name, listener) => {
        const index = listeners.indexOf(listener);
        if (index !== -1) listeners.splice(index, 1);
    };
    window.windowsInteropPostMessage = (payload) => {
        window.__outgoingMessages.push({ payload });
        if (!Object.prototype.hasOwnProperty.call(responses, payload.method)) {
            // Unregistered methods receive no response at all.
            return;
        }
        const event = {
            origin: window.origin,
            data: {
                result: responses[payload.method],
                context: messagingContext.context,
                featureName: payload.featureName,
                id: payload.id
            }
        };
        for (const listener of listeners.slice()) {
            listener(event);
        }
    };
})();
"#;

// ============================================================================
// Tests
// ============================================================================
