use crate::core::{ConfigProvider, Gym, GymDocument, GymRow, Pipeline, Storage};
use crate::utils::error::{ExportError, Result};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{Connection, SqliteConnection};

/// File name the front-end loads the document from.
pub const OUTPUT_FILE: &str = "climbing-gyms.json";

const SELECT_GYMS: &str = "SELECT id, name, city, address, map_url, place_id, \
     latitude, longitude, subway_line, subway_station, bus_tram, website_url, \
     price_currency, price_amount, price_tax, price_source_url, icon_url, \
     image_url, area_unit, area_value, boulder, top_rope, lead, auto_belay, \
     moon_board, kilter_board \
     FROM gyms";

pub struct GymPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> GymPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn source_unavailable(&self, source: sqlx::Error) -> ExportError {
        ExportError::SourceUnavailable {
            path: self.config.database_path().to_string(),
            source,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for GymPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<GymRow>> {
        let database_path = self.config.database_path();
        tracing::debug!("Opening source database: {}", database_path);

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .read_only(true);

        let mut conn = SqliteConnection::connect_with(&options)
            .await
            .map_err(|e| self.source_unavailable(e))?;

        // SELECT without ORDER BY walks the table in rowid order, which is
        // the natural row order the document must preserve.
        let fetched = sqlx::query_as::<_, GymRow>(SELECT_GYMS)
            .fetch_all(&mut conn)
            .await;

        if let Err(e) = conn.close().await {
            tracing::warn!("Failed to close source database cleanly: {}", e);
        }

        fetched.map_err(|e| self.source_unavailable(e))
    }

    async fn transform(&self, rows: Vec<GymRow>) -> Result<GymDocument> {
        let gyms: Vec<Gym> = rows.into_iter().map(Gym::from).collect();
        tracing::debug!("Mapped {} rows to gym objects", gyms.len());
        Ok(GymDocument { gyms })
    }

    async fn load(&self, document: GymDocument) -> Result<String> {
        // 4-space indentation; serde_json leaves non-ASCII unescaped.
        let mut buf = Vec::new();
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        document.serialize(&mut serializer)?;

        tracing::debug!("Writing {} bytes to {}", buf.len(), OUTPUT_FILE);
        self.storage.write_file(OUTPUT_FILE, &buf).await?;

        Ok(format!("{}/{}", self.config.output_path(), OUTPUT_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ExportError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig;

    impl ConfigProvider for MockConfig {
        fn database_path(&self) -> &str {
            "test.db"
        }

        fn output_path(&self) -> &str {
            "./output"
        }
    }

    fn row(id: i64, name: &str) -> GymRow {
        GymRow {
            id,
            name: name.to_string(),
            city: "Berlin".to_string(),
            address: "Kletterstraße 9".to_string(),
            map_url: "https://maps.example.com/g".to_string(),
            place_id: format!("pl_{id}"),
            latitude: 52.52,
            longitude: 13.405,
            subway_line: None,
            subway_station: None,
            bus_tram: 0,
            website_url: "https://gym.example.com".to_string(),
            price_currency: "EUR".to_string(),
            price_amount: 15.0,
            price_tax: 19.0,
            price_source_url: Some("https://gym.example.com/prices".to_string()),
            icon_url: "https://cdn.example.com/i.png".to_string(),
            image_url: "https://cdn.example.com/p.jpg".to_string(),
            area_unit: "sqm".to_string(),
            area_value: 1200.0,
            boulder: 1,
            top_rope: 1,
            lead: 1,
            auto_belay: 0,
            moon_board: 1,
            kilter_board: 0,
        }
    }

    #[tokio::test]
    async fn transform_preserves_row_order_and_count() {
        let pipeline = GymPipeline::new(MockStorage::new(), MockConfig);
        let rows = vec![row(3, "Gamma"), row(1, "Alpha"), row(2, "Beta")];

        let document = pipeline.transform(rows).await.unwrap();

        assert_eq!(document.gyms.len(), 3);
        let ids: Vec<i64> = document.gyms.iter().map(|g| g.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn transform_of_no_rows_yields_empty_document() {
        let pipeline = GymPipeline::new(MockStorage::new(), MockConfig);
        let document = pipeline.transform(Vec::new()).await.unwrap();
        assert!(document.gyms.is_empty());
    }

    #[tokio::test]
    async fn load_writes_four_space_indented_json() {
        let storage = MockStorage::new();
        let pipeline = GymPipeline::new(storage.clone(), MockConfig);
        let document = pipeline.transform(vec![row(1, "Boulder Hub")]).await.unwrap();

        let output_path = pipeline.load(document).await.unwrap();
        assert_eq!(output_path, format!("./output/{OUTPUT_FILE}"));

        let bytes = storage.get_file(OUTPUT_FILE).await.unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("{\n    \"gyms\""));
        assert!(text.contains("\n                \"boulder\": true"));

        let parsed: GymDocument = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed.gyms[0].name, "Boulder Hub");
    }

    #[tokio::test]
    async fn load_of_empty_document_writes_empty_gyms_array() {
        let storage = MockStorage::new();
        let pipeline = GymPipeline::new(storage.clone(), MockConfig);

        pipeline
            .load(GymDocument { gyms: Vec::new() })
            .await
            .unwrap();

        let bytes = storage.get_file(OUTPUT_FILE).await.unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(parsed, serde_json::json!({ "gyms": [] }));
    }

    #[tokio::test]
    async fn load_keeps_non_ascii_literal() {
        let storage = MockStorage::new();
        let pipeline = GymPipeline::new(storage.clone(), MockConfig);
        let mut gym_row = row(1, "Kletterzentrum Zürich");
        gym_row.city = "Zürich".to_string();

        let document = pipeline.transform(vec![gym_row]).await.unwrap();
        pipeline.load(document).await.unwrap();

        let bytes = storage.get_file(OUTPUT_FILE).await.unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("Kletterzentrum Zürich"));
        assert!(!text.contains("\\u"));
    }
}
