//! OpenAPI documentation configuration
//!
//! Generates the OpenAPI 3.0 specification for the Lumark API.

use utoipa::OpenApi;

use crate::handlers::{CapacityResponse, HealthResponse, HistoryEntry, ReadyResponse, VerifyResponse};

/// Lumark API - OpenAPI Documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lumark API",
        version = "0.1.0",
        description = r#"
## Invisible Image Provenance Marking API

Lumark embeds a **machine-verifiable, invisible payload** into raster images:

- **DCT-domain embedding** - one payload bit per 8x8 pixel block, carried by
  a mid-frequency coefficient
- **Deterministic geometry** - block positions derive from image dimensions
  alone, so no side channel is needed for recovery
- **Integrity gating** - every marked image must survive a full embed/extract
  round trip before its record is persisted
- **Lossless output** - marked images are returned as PNG; lossy re-compression
  would destroy the mark

### How It Works

1. **Mark** an image for a purpose via `POST /mark`
2. The server embeds a fresh 256-bit payload and stores the payload/purpose record
3. **Verify** any candidate copy later via `POST /verify`
4. The recovered payload resolves back to the purpose and marking time
"#,
        license(
            name = "MIT OR Apache-2.0",
            url = "https://github.com/lumark-dev/lumark/blob/main/LICENSE"
        ),
        contact(
            name = "Lumark Team",
            url = "https://github.com/lumark-dev/lumark"
        )
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    tags(
        (name = "Marking", description = "Embed payloads into images and inspect capacity"),
        (name = "Verification", description = "Recover payloads and resolve marking records"),
        (name = "Diagnostics", description = "Visual inspection of the block geometry"),
        (name = "Health", description = "Service health and readiness endpoints")
    ),
    paths(
        crate::handlers::health::health,
        crate::handlers::health::ready,
        crate::handlers::mark::mark_handler,
        crate::handlers::verify::verify_handler,
        crate::handlers::capacity::capacity_handler,
        crate::handlers::overlay::overlay_handler,
        crate::handlers::history::history_handler,
    ),
    components(
        schemas(
            CapacityResponse,
            HealthResponse,
            HistoryEntry,
            ReadyResponse,
            VerifyResponse,
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_document_generates() {
        let doc = ApiDoc::openapi();
        let json = doc.to_json().expect("document should serialize");
        assert!(json.contains("/mark"));
        assert!(json.contains("/verify"));
        assert!(json.contains("/capacity"));
    }
}
