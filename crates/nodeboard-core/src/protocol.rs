//! Line-delimited JSON envelope spoken by the headless driver.

use crate::controller::{Effect, HostCommand, SurfaceEvent};
use crate::error::DriverError;
use crate::model::GraphSnapshot;
use crate::view::SceneView;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Deserialize, Serialize)]
pub struct Request {
    #[serde(default)]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct Response {
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<ResponseResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ResponseResult {
    Applied {
        effect: Effect,
        snapshot: GraphSnapshot,
    },
    Snapshot {
        snapshot: GraphSnapshot,
    },
    View {
        view: SceneView,
    },
}

#[derive(Debug, Serialize)]
pub struct ResponseError {
    pub code: i32,
    pub message: String,
}

impl Response {
    pub fn ok(id: Option<Value>, result: ResponseResult) -> Self {
        Self {
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn err(id: Option<Value>, error: &DriverError) -> Self {
        Self {
            id,
            result: None,
            error: Some(ResponseError {
                code: error.code(),
                message: error.to_string(),
            }),
        }
    }
}

/// A decoded request, ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Event(SurfaceEvent),
    Command(HostCommand),
    Snapshot,
    View,
}

const EVENT_METHODS: &[&str] = &[
    "node_hover_enter",
    "node_hover_leave",
    "node_click",
    "node_delete_control",
    "edge_hover_enter",
    "edge_hover_leave",
    "edge_click",
    "connect",
];

const COMMAND_METHODS: &[&str] = &[
    "add_node",
    "set_add_text",
    "submit_add_text",
    "edit_input",
    "edit_commit",
    "save_edit",
];

impl Request {
    pub fn parse(line: &str) -> Result<Self, DriverError> {
        serde_json::from_str(line).map_err(DriverError::Parse)
    }

    pub fn into_call(self) -> Result<Call, DriverError> {
        let method = match self.method.as_str() {
            "node_delete" => "node_delete_control",
            other => other,
        };
        if EVENT_METHODS.contains(&method) {
            return tagged("event", method, self.params).map(Call::Event);
        }
        if COMMAND_METHODS.contains(&method) {
            return tagged("command", method, self.params).map(Call::Command);
        }
        match method {
            "snapshot" => Ok(Call::Snapshot),
            "view" => Ok(Call::View),
            _ => Err(DriverError::UnknownMethod(self.method)),
        }
    }
}

/// Fold the method name into the params object as the enum tag.
fn tagged<T: DeserializeOwned>(
    tag_key: &str,
    method: &str,
    params: Option<Value>,
) -> Result<T, DriverError> {
    let mut object = match params {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(DriverError::ParamsNotObject(method.to_string())),
    };
    object.insert(tag_key.to_string(), Value::String(method.to_string()));
    serde_json::from_value(Value::Object(object)).map_err(|source| DriverError::InvalidParams {
        method: method.to_string(),
        source,
    })
}
