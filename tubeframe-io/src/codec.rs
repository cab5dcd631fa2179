//! 型材记录与通用 JSON 树之间的双向映射。
//!
//! 每条记录通过 `objtype` 字段区分变体；无法识别的记录原样返回，
//! 以便未来扩展的数据在旧版本中仍可读取。

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::{Map, Value};
use tubeframe_core::profile::{FrameProfile, FrameShape, HoleProfile, ProfileKind};

use crate::IoError;

/// 判别字段名，与旧版工具写出的文件保持一致。
pub const KIND_KEY: &str = "objtype";
pub const HOLE_TAG: &str = "HoleProfile";

const INDENT: &[u8] = b"    ";

/// 解码结果。
#[derive(Debug, Clone, PartialEq)]
pub enum Decoded {
    Hole(HoleProfile),
    Frame(FrameProfile),
    /// 判别字段缺失或未知，原样保留。
    Passthrough(Value),
}

impl Decoded {
    pub fn into_hole(self) -> Option<HoleProfile> {
        match self {
            Decoded::Hole(hole) => Some(hole),
            _ => None,
        }
    }

    /// 简短描述，用于错误信息。
    pub fn describe(&self) -> String {
        match self {
            Decoded::Hole(_) => HOLE_TAG.to_string(),
            Decoded::Frame(profile) => profile.kind().tag().to_string(),
            Decoded::Passthrough(Value::Object(map)) => match map.get(KIND_KEY) {
                Some(tag) => format!("unrecognized record {tag}"),
                None => "untagged object".to_string(),
            },
            Decoded::Passthrough(_) => "non-object value".to_string(),
        }
    }
}

pub fn encode_hole(hole: &HoleProfile) -> Value {
    let mut map = Map::new();
    map.insert("diameter".into(), Value::from(hole.diameter));
    map.insert("edgeDistance".into(), Value::from(hole.edge_distance));
    map.insert(KIND_KEY.into(), Value::from(HOLE_TAG));
    map.insert("offset".into(), Value::from(hole.offset));
    map.insert("spacing".into(), Value::from(hole.spacing));
    Value::Object(map)
}

/// 按显式字段表编码型材；非有限长度会被编码为 `null`，解码时报错。
pub fn encode_profile(profile: &FrameProfile) -> Value {
    let shape = profile.shape();
    let mut map = Map::new();
    map.insert("height".into(), Value::from(shape.height()));
    map.insert(
        "horizontalHoles".into(),
        encode_hole_list(shape.horizontal_holes()),
    );
    map.insert("id".into(), Value::from(shape.id()));
    map.insert(KIND_KEY.into(), Value::from(profile.kind().tag()));
    map.insert(
        "verticalHoles".into(),
        encode_hole_list(shape.vertical_holes()),
    );
    map.insert("wallThickness".into(), Value::from(shape.wall_thickness()));
    map.insert("width".into(), Value::from(shape.width()));
    Value::Object(map)
}

fn encode_hole_list(holes: &[HoleProfile]) -> Value {
    Value::Array(holes.iter().map(encode_hole).collect())
}

/// 以四空格缩进、`": "` 分隔符输出 JSON。`Map` 保证键按字典序排列。
pub fn to_pretty_vec(value: &Value) -> Result<Vec<u8>, IoError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(INDENT);
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(IoError::SerializeError)?;
    Ok(buffer)
}

enum Route {
    Hole,
    Frame(ProfileKind),
    Unknown,
}

fn route(map: &Map<String, Value>) -> Route {
    match map.get(KIND_KEY).and_then(Value::as_str) {
        Some(HOLE_TAG) => Route::Hole,
        Some(tag) => ProfileKind::from_tag(tag).map_or(Route::Unknown, Route::Frame),
        None => Route::Unknown,
    }
}

/// 自底向上解码：型材中的孔列表条目先被解码为 `HoleProfile`，再组装外层记录。
pub fn decode(value: Value) -> Result<Decoded, IoError> {
    let map = match value {
        Value::Object(map) => map,
        other => return Ok(Decoded::Passthrough(other)),
    };
    match route(&map) {
        Route::Hole => decode_hole(&map).map(Decoded::Hole),
        Route::Frame(kind) => decode_frame(kind, map).map(Decoded::Frame),
        Route::Unknown => Ok(Decoded::Passthrough(Value::Object(map))),
    }
}

/// 解码并要求结果为型材记录。
pub fn decode_profile(value: Value) -> Result<FrameProfile, IoError> {
    match decode(value)? {
        Decoded::Frame(profile) => Ok(profile),
        other => Err(IoError::UnexpectedRecord(other.describe())),
    }
}

fn decode_hole(map: &Map<String, Value>) -> Result<HoleProfile, IoError> {
    Ok(HoleProfile::new(
        required_length(map, HOLE_TAG, "offset")?,
        required_length(map, HOLE_TAG, "edgeDistance")?,
        required_length(map, HOLE_TAG, "spacing")?,
        required_length(map, HOLE_TAG, "diameter")?,
    ))
}

fn decode_frame(kind: ProfileKind, mut map: Map<String, Value>) -> Result<FrameProfile, IoError> {
    let record = kind.tag();
    let mut shape = FrameShape::new(
        required_length(&map, record, "width")?,
        required_length(&map, record, "height")?,
        required_length(&map, record, "wallThickness")?,
    );
    shape.extend_vertical_holes(decode_hole_list(&mut map, record, "verticalHoles")?);
    shape.extend_horizontal_holes(decode_hole_list(&mut map, record, "horizontalHoles")?);
    let shape = match map.get("id") {
        Some(Value::String(id)) => shape.with_id(id.as_str()),
        Some(_) => return Err(IoError::malformed(record, "id", "is not a string")),
        None => return Err(IoError::malformed(record, "id", "is missing")),
    };
    Ok(FrameProfile::from_shape(kind, shape))
}

fn decode_hole_list(
    map: &mut Map<String, Value>,
    record: &str,
    key: &str,
) -> Result<Vec<HoleProfile>, IoError> {
    let entries = match map.remove(key) {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(IoError::malformed(record, key, "is not a list")),
        None => return Err(IoError::malformed(record, key, "is missing")),
    };
    entries
        .into_iter()
        .enumerate()
        .map(|(index, entry)| match decode(entry)? {
            Decoded::Hole(hole) => Ok(hole),
            _ => Err(IoError::malformed(
                record,
                &format!("{key}[{index}]"),
                "is not a HoleProfile record",
            )),
        })
        .collect()
}

fn required_length(map: &Map<String, Value>, record: &str, key: &str) -> Result<f64, IoError> {
    match map.get(key) {
        Some(value) => value
            .as_f64()
            .ok_or_else(|| IoError::malformed(record, key, "is not a number")),
        None => Err(IoError::malformed(record, key, "is missing")),
    }
}
