use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::VipError;

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Trash retention when the request names none.
pub const DEFAULT_TTL_DAYS: i64 = 30;
/// Status every finalized asset is reported with.
pub const READY_FOR_EDIT: &str = "ready_for_edit";
/// Assets reported when a whole folder is finalized.
pub const STUB_FOLDER_ASSETS: [&str; 3] = ["stub_001", "stub_002", "stub_003"];

// --- Response types ---

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FinalizedAsset {
    pub asset_id: String,
    #[cfg_attr(feature = "openapi", schema(value_type = String, example = "ready_for_edit"))]
    pub status: &'static str,
    /// Unix seconds
    pub finalized_at: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FinalizeResponse {
    pub gallery_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<Vec<Object>>))]
    pub asset_ids: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    pub finalized: Vec<FinalizedAsset>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RestoredAsset {
    pub asset_id: String,
    pub restored_at: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RestoreResponse {
    pub gallery_id: String,
    pub restored: Vec<RestoredAsset>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrashedAsset {
    pub asset_id: String,
    pub trashed_at: i64,
    pub ttl_days: i64,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TrashResponse {
    pub gallery_id: String,
    pub trashed: Vec<TrashedAsset>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RemoveItemsResponse {
    pub gallery_id: String,
    pub folder_id: String,
    pub removed: Vec<String>,
}

// --- Request parsing ---

/// Parses a JSON object body. An empty body reads as `{}`.
pub fn parse_body(bytes: &[u8]) -> Result<Map<String, Value>, VipError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(bytes) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(VipError::InvalidBody),
    }
}

/// `assetIds` as a non-empty list of non-blank strings.
fn asset_ids(body: &Map<String, Value>) -> Result<Vec<String>, VipError> {
    let items = body
        .get("assetIds")
        .and_then(Value::as_array)
        .filter(|items| !items.is_empty())
        .ok_or(VipError::InvalidAssetIds)?;

    items
        .iter()
        .map(|item| match item {
            Value::String(s) if !s.trim().is_empty() => Ok(s.clone()),
            _ => Err(VipError::InvalidAssetIds),
        })
        .collect()
}

fn ttl_days(body: &Map<String, Value>) -> Result<i64, VipError> {
    let Some(value) = body.get("ttlDays") else {
        return Ok(DEFAULT_TTL_DAYS);
    };
    let parsed = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f.trunc() as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| VipError::InvalidTtlDays(value.clone()))
}

// --- Operations ---

/// Marks assets as ready for editing.
///
/// Exactly one of `assetIds` (an array) or `folderId` (a non-empty string)
/// must be given. Folder mode reports a fixed set of stub assets.
pub fn finalize(
    gallery_id: String,
    body: &Map<String, Value>,
    now: i64,
) -> Result<FinalizeResponse, VipError> {
    let assets = body.get("assetIds").and_then(Value::as_array);
    let folder = body
        .get("folderId")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty());

    let finalized_asset = |asset_id: String| FinalizedAsset {
        asset_id,
        status: READY_FOR_EDIT,
        finalized_at: now,
    };

    match (assets, folder) {
        (Some(assets), None) => Ok(FinalizeResponse {
            gallery_id,
            asset_ids: Some(assets.clone()),
            folder_id: None,
            finalized: assets
                .iter()
                .map(|id| match id {
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .map(finalized_asset)
                .collect(),
        }),
        (None, Some(folder_id)) => Ok(FinalizeResponse {
            gallery_id,
            asset_ids: None,
            folder_id: Some(folder_id.to_string()),
            finalized: STUB_FOLDER_ASSETS
                .iter()
                .map(|id| finalized_asset(id.to_string()))
                .collect(),
        }),
        _ => Err(VipError::FinalizeTarget),
    }
}

pub fn restore(
    gallery_id: String,
    body: &Map<String, Value>,
    now: i64,
) -> Result<RestoreResponse, VipError> {
    let restored = asset_ids(body)?
        .into_iter()
        .map(|asset_id| RestoredAsset {
            asset_id,
            restored_at: now,
        })
        .collect();
    Ok(RestoreResponse {
        gallery_id,
        restored,
    })
}

pub fn trash(
    gallery_id: String,
    body: &Map<String, Value>,
    now: i64,
) -> Result<TrashResponse, VipError> {
    let ids = asset_ids(body)?;
    let ttl_days = ttl_days(body)?;
    let trashed = ids
        .into_iter()
        .map(|asset_id| TrashedAsset {
            asset_id,
            trashed_at: now,
            ttl_days,
        })
        .collect();
    Ok(TrashResponse {
        gallery_id,
        trashed,
    })
}

pub fn remove_items(
    gallery_id: String,
    folder_id: String,
    body: &Map<String, Value>,
) -> Result<RemoveItemsResponse, VipError> {
    Ok(RemoveItemsResponse {
        gallery_id,
        folder_id,
        removed: asset_ids(body)?,
    })
}
