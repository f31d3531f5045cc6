use serde::Serialize;
use serde_json::{Map, Value};

// payload (div.c-wrap-main script)
//  ├── nbresults   "1 234"   (thousands split by a no-break space)
//  ├── nbpage      "1"
//  └── products    [ ListingRecord, ... ]
//       ├── idannonce
//       ├── prix, surface, nb_pieces, nb_chambres, ...
//       └── affichagetype, idtypepublicationsourcecouplage, produitsvisibilite

pub const RESULTS_PER_PAGE: u64 = 20;

/// Raw response as handed back by a `Transport`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchResult {
    /// Final URL after redirects.
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl FetchResult {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// One validated and extracted result page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedPage {
    pub url: String,
    pub index: u32,
    pub total_results: u64,
    pub results_per_page: u64,
    pub payload: Value,
    #[serde(skip)]
    pub body: String,
}

impl ParsedPage {
    /// The page's listing array; pages without one have no listings.
    pub fn products(&self) -> &[Value] {
        self.payload
            .get("products")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn listings(&self) -> impl Iterator<Item = ListingRecord> + '_ {
        self.products().iter().map(ListingRecord::from_value)
    }
}

/// A single ad, with fields in payload order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ListingRecord(Map<String, Value>);

impl ListingRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Non-object entries in the listing array are kept under `value`.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Object(map) => Self(map.clone()),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other.clone());
                Self(map)
            }
        }
    }

    pub fn id(&self) -> Option<String> {
        self.0.get("idannonce").map(value_to_text)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Plain-text rendering used for echoes and text cells: strings unquoted,
/// null empty, anything nested as compact JSON.
pub fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}
