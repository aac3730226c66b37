use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// 離線資料庫中的原始地址紀錄
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location_type: String,
    pub longitude: f64,
    pub latitude: f64,
    pub created_by: String,
    #[serde(default)]
    pub created_by_name: String,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default)]
    pub plus_code: String,
    pub created_at: String,
}

/// 註冊用的地址輸入，`_id` 由後端指定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub location_type: String,
    pub longitude: f64,
    pub latitude: f64,
    pub created_by: String,
    #[serde(default)]
    pub created_by_name: String,
    pub project: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observations: Option<String>,
    #[serde(default)]
    pub plus_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// GeoJSON 點，座標順序為 `[經度, 緯度]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

impl GeoPoint {
    pub fn longitude(&self) -> f64 {
        self.coordinates[0]
    }

    pub fn latitude(&self) -> f64 {
        self.coordinates[1]
    }
}

/// 兩個後端共用的地址文件
///
/// 線上結果原封不動保留 API 的 JSON（未展開的 `createdBy`、`null` 欄位都照舊），
/// 離線結果則由 [`crate::core::format::format_result`] 組成相同形狀。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Address(Value);

impl Address {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn id(&self) -> Option<&str> {
        self.get_str("_id")
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn observations(&self) -> Option<&str> {
        self.get_str("observations")
    }

    pub fn location_type(&self) -> Option<&str> {
        self.get_str("locationType")
    }

    pub fn plus_code(&self) -> Option<&str> {
        self.get_str("plusCode")
    }

    pub fn created_at(&self) -> Option<&str> {
        self.get_str("createdAt")
    }

    /// 形狀不符時回傳 `None`
    pub fn location(&self) -> Option<GeoPoint> {
        self.get("location")
            .and_then(|v| GeoPoint::deserialize(v).ok())
    }

    /// `createdBy` 可能是展開的物件或單純的 id
    pub fn created_by_id(&self) -> Option<&str> {
        match self.get("createdBy")? {
            Value::String(id) => Some(id),
            creator => creator.get("_id").and_then(Value::as_str),
        }
    }

    pub fn created_by_name(&self) -> Option<&str> {
        self.get("createdBy")?.get("name").and_then(Value::as_str)
    }
}

impl From<Value> for Address {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// 依插入順序保存的篩選參數
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pairs: Vec<(String, String)>,
}

impl SearchParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((key.into(), value.into()));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// `application/x-www-form-urlencoded`，保留插入順序
    pub fn to_query_string(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for (key, value) in self.iter() {
            serializer.append_pair(key, value);
        }
        serializer.finish()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for SearchParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.push(key, value);
        }
        params
    }
}

/// 註冊結果
///
/// 線上路徑回傳 API 的原始回應；離線路徑只表示已交給本地儲存，
/// 不檢查寫入結果，序列化為 `{}`。
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Created(Value),
    Accepted,
}

impl Serialize for Registration {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Registration::Created(body) => body.serialize(serializer),
            Registration::Accepted => serializer.serialize_map(Some(0))?.end(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_string_preserves_order_and_encodes() {
        let params = SearchParams::new()
            .with("b", "2")
            .with("a", "1")
            .with("name", "rua das flores & cia");

        assert_eq!(
            params.to_query_string(),
            "b=2&a=1&name=rua+das+flores+%26+cia"
        );
    }

    #[test]
    fn test_empty_params_produce_empty_query() {
        assert_eq!(SearchParams::new().to_query_string(), "");
    }

    #[test]
    fn test_address_round_trips_unchanged() {
        let body = json!({
            "location": {"type": "Point", "coordinates": [-46.6, -23.5]},
            "_id": "a1",
            "name": null,
            "observations": null,
            "locationType": "house",
            "createdBy": {"_id": "u1", "name": "Ana"},
            "project": {"_id": "p1", "title": "Censo"},
            "plusCode": "588MC9X8+",
            "createdAt": "2024-01-01T00:00:00.000Z",
            "__v": 0
        });

        let address: Address = serde_json::from_value(body.clone()).unwrap();
        assert_eq!(address.location().unwrap().longitude(), -46.6);
        assert_eq!(address.location().unwrap().latitude(), -23.5);
        assert_eq!(address.name(), None);
        assert_eq!(address.created_by_id(), Some("u1"));
        assert_eq!(address.created_by_name(), Some("Ana"));
        assert_eq!(serde_json::to_value(&address).unwrap(), body);
    }

    #[test]
    fn test_unpopulated_creator_and_missing_location() {
        let address: Address = serde_json::from_value(json!({
            "_id": "a2",
            "createdBy": "u9"
        }))
        .unwrap();

        assert_eq!(address.created_by_id(), Some("u9"));
        assert_eq!(address.created_by_name(), None);
        assert_eq!(address.location(), None);
    }

    #[test]
    fn test_accepted_registration_serializes_as_empty_object() {
        assert_eq!(serde_json::to_value(Registration::Accepted).unwrap(), json!({}));
    }

    #[test]
    fn test_created_registration_keeps_body() {
        let ack = json!({"message": "Address created", "id": "a3"});
        assert_eq!(
            serde_json::to_value(Registration::Created(ack.clone())).unwrap(),
            ack
        );
    }
}
