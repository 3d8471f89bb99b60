//! apple-isolated wrapping and mock messaging shim.
//!
//! The apple-isolated build runs in a WebKit isolated world: the feature
//! script is wrapped in an IIFE so nothing it declares leaks into page
//! scope, and the mock native host is installed as
//! `window.webkit.messageHandlers`, the surface the build posts through.

// ============================================================================
// Public Functions
// ============================================================================

/// Wraps a resolved artifact for the apple-isolated build.
#[must_use]
pub(crate) fn wrap(resolved: &str) -> String {
    WEBKIT_WRAPPER_TEMPLATE.replace("$ARTIFACT_SOURCE", resolved)
}

/// Renders the WebKit mock messaging shim.
///
/// `install_json` is the serialized install payload: the messaging context
/// plus the response registry. The shim captures every posted call into the
/// in-page log, answers registered methods with their canned response, and
/// stays silent for everything else.
#[must_use]
pub(crate) fn mock_host_script(install_json: &str) -> String {
    WEBKIT_MOCK_TEMPLATE.replace("$INSTALL_JSON", install_json)
}

// ============================================================================
// Templates
// ============================================================================

/// IIFE wrapper for the isolated world.
const WEBKIT_WRAPPER_TEMPLATE: &str = r#"(() => {
    "use strict";
$ARTIFACT_SOURCE
})();
"#;

/// Mock `window.webkit.messageHandlers` installation.
const WEBKIT_MOCK_TEMPLATE: &str = r#"(() => {
    "use strict";
    const install = $INSTALL_JSON;
    const { messagingContext, responses } = install;
    window.__outgoingMessages = window.__outgoingMessages || [];
    window.webkit = {
        messageHandlers: {
            [messagingContext.context]: {
                postMessage: (payload) => {
                    window.__outgoingMessages.push({ payload });
                    if (Object.prototype.hasOwnProperty.call(responses, payload.method)) {
                        return Promise.resolve({
                            result: responses[payload.method],
                            context: messagingContext.context,
                            featureName: payload.featureName,
                            id: payload.id
                        });
                    }
                    // Unregistered methods receive no response at all.
                    return new Promise(() => {});
                }
            }
        }
    };
})();
"#;

// ============================================================================
// Tests
// ============================================================================
