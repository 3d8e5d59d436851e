//! The envelope around archived replays.
//!
//! The archive service answers with `{"viewResponse": {...}}`. Its
//! `gameState` field is a string holding `{"gameState": "..."}`, whose own
//! `gameState` string is the replay document. Each layer is decoded in turn
//! and a failure names the layer it happened in.

use std::io::Read;

use serde::Deserialize;
use serde_json::value::RawValue;
use tracing::debug;
use wits_core::ConvertConfig;

use crate::error::{EnvelopeLayer, OsnError};
use crate::replay::GameReplay;

/// Initial capacity of the read buffer.
const BUFFER_SIZE_INIT: usize = 1 << 14;

#[derive(Deserialize)]
struct WireFormat<'a> {
    #[serde(borrow, rename = "viewResponse")]
    view_response: &'a RawValue,
}

/// Outer layer of the envelope.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ViewResponse {
    /// Embedded JSON of the inner layer.
    #[serde(rename = "gameState")]
    pub game_state: String,
    /// Path of the map asset used by the match.
    #[serde(default, rename = "viewResponse")]
    pub view: String,
    #[serde(default, rename = "foundRoom")]
    pub found_room: bool,
    #[serde(default)]
    pub room: String,
}

#[derive(Deserialize)]
struct InnerWrapper {
    #[serde(rename = "gameState")]
    game_state: String,
}

fn layer_error(layer: EnvelopeLayer) -> impl Fn(serde_json::Error) -> OsnError {
    move |source| OsnError::MalformedEnvelope { layer, source }
}

/// Decodes the outer layer. `viewResponse` is accepted both as an object
/// and as a string holding that object.
pub fn view_response(bytes: &[u8]) -> Result<ViewResponse, OsnError> {
    let malformed = layer_error(EnvelopeLayer::ViewResponse);
    let wire: WireFormat<'_> = serde_json::from_slice(bytes).map_err(&malformed)?;
    let raw = wire.view_response.get();
    if raw.starts_with('"') {
        let embedded: String = serde_json::from_str(raw).map_err(&malformed)?;
        serde_json::from_str(&embedded).map_err(malformed)
    } else {
        serde_json::from_str(raw).map_err(malformed)
    }
}

/// Returns the replay document carried by an enveloped response.
pub fn unwrap_envelope(bytes: &[u8]) -> Result<String, OsnError> {
    let outer = view_response(bytes)?;
    let inner: InnerWrapper = serde_json::from_str(&outer.game_state)
        .map_err(layer_error(EnvelopeLayer::GameState))?;
    debug!(room = %outer.room, bytes = inner.game_state.len(), "unwrapped replay envelope");
    Ok(inner.game_state)
}

/// Reads an enveloped replay with the default conversion settings.
pub fn parse_replay(reader: impl Read) -> Result<GameReplay, OsnError> {
    parse_replay_with(reader, &ConvertConfig::default())
}

/// Reads the whole stream before decoding any of it.
pub fn parse_replay_with(
    mut reader: impl Read,
    config: &ConvertConfig,
) -> Result<GameReplay, OsnError> {
    let mut contents = Vec::with_capacity(BUFFER_SIZE_INIT);
    reader.read_to_end(&mut contents)?;
    let document = unwrap_envelope(&contents)?;
    GameReplay::decode(&document, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn envelope(document: &serde_json::Value) -> serde_json::Value {
        let inner = json!({ "gameState": document.to_string() });
        json!({
            "viewResponse": {
                "gameState": inner.to_string(),
                "viewResponse": "maps/sharkfood.hxm",
                "foundRoom": true,
                "room": "abc"
            }
        })
    }

    #[test]
    fn unwraps_both_string_layers() {
        let document = json!({"game_id": "abc"});
        let bytes = envelope(&document).to_string();
        let unwrapped = unwrap_envelope(bytes.as_bytes()).unwrap();
        assert_eq!(serde_json::from_str::<serde_json::Value>(&unwrapped).unwrap(), document);
    }

    #[test]
    fn view_response_may_itself_be_a_string() {
        let document = json!({"game_id": "abc"});
        let outer = envelope(&document)["viewResponse"].to_string();
        let bytes = json!({ "viewResponse": outer }).to_string();
        let response = view_response(bytes.as_bytes()).unwrap();
        assert!(response.found_room);
        assert_eq!(response.view, "maps/sharkfood.hxm");
        assert!(unwrap_envelope(bytes.as_bytes()).is_ok());
    }

    #[test]
    fn failures_name_their_layer() {
        let layer = |bytes: &str| match unwrap_envelope(bytes.as_bytes()) {
            Err(OsnError::MalformedEnvelope { layer, .. }) => Some(layer),
            _ => None,
        };
        assert_eq!(layer("not json"), Some(EnvelopeLayer::ViewResponse));
        assert_eq!(layer(r#"{"view": {}}"#), Some(EnvelopeLayer::ViewResponse));
        assert_eq!(
            layer(r#"{"viewResponse": {"gameState": "[1, 2"}}"#),
            Some(EnvelopeLayer::GameState)
        );
        assert_eq!(
            layer(r#"{"viewResponse": {"gameState": "{\"room\": 1}"}}"#),
            Some(EnvelopeLayer::GameState)
        );
    }

    #[test]
    fn read_errors_surface_as_io() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }
        assert!(matches!(parse_replay(Broken), Err(OsnError::Io(_))));
    }
}
