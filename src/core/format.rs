use crate::domain::model::{Address, AddressRecord};
use serde_json::{json, Map, Value};

/// 將離線紀錄整理成地址文件，長度與順序不變
pub fn format_result(records: Vec<AddressRecord>) -> Vec<Address> {
    records.into_iter().map(format_record).collect()
}

pub fn format_record(record: AddressRecord) -> Address {
    let mut document = Map::new();

    document.insert(
        "location".to_string(),
        json!({
            "type": "Point",
            "coordinates": [record.longitude, record.latitude],
        }),
    );
    document.insert("_id".to_string(), Value::String(record.id));
    if let Some(name) = non_empty(record.name) {
        document.insert("name".to_string(), Value::String(name));
    }
    document.insert(
        "locationType".to_string(),
        Value::String(record.location_type),
    );
    document.insert(
        "createdBy".to_string(),
        json!({
            "_id": record.created_by,
            "name": record.created_by_name,
        }),
    );
    document.insert("project".to_string(), Value::String(record.project));
    if let Some(observations) = non_empty(record.observations) {
        document.insert("observations".to_string(), Value::String(observations));
    }
    document.insert("plusCode".to_string(), Value::String(record.plus_code));
    document.insert("createdAt".to_string(), Value::String(record.created_at));

    Address::from_value(Value::Object(document))
}

// 空字串視同未填
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
