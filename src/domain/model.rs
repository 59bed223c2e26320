use serde::{Deserialize, Serialize};

/// One row of the source `gyms` table, columns as stored.
///
/// Capability flags (`bus_tram`, `boulder`, ...) are kept as raw integers;
/// the row→gym mapping coerces them to booleans.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GymRow {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub map_url: String,
    pub place_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub subway_line: Option<String>,
    pub subway_station: Option<String>,
    pub bus_tram: i64,
    pub website_url: String,
    pub price_currency: String,
    pub price_amount: f64,
    pub price_tax: f64,
    pub price_source_url: Option<String>,
    pub icon_url: String,
    pub image_url: String,
    pub area_unit: String,
    pub area_value: f64,
    pub boulder: i64,
    pub top_rope: i64,
    pub lead: i64,
    pub auto_belay: i64,
    pub moon_board: i64,
    pub kilter_board: i64,
}

/// The full export document: `{"gyms": [...]}` in source row order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymDocument {
    pub gyms: Vec<Gym>,
}

/// One gym in the nested shape the front-end consumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gym {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub address: String,
    pub map_url: String,
    pub place_id: String,
    pub coordinates: Coordinates,
    pub public_transport: PublicTransport,
    pub website_url: String,
    pub price: Price,
    pub icon_url: String,
    pub image_url: String,
    pub area: Area,
    pub climbing_types: ClimbingTypes,
    pub boards: Boards,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// `subway` is omitted entirely (not null) when the source has no
/// subway line or station.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicTransport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subway: Option<Subway>,
    pub bus_or_tram: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subway {
    pub line: String,
    pub station: String,
}

/// `sourceUrl` stays in the document as an explicit `null` when the
/// source column is NULL, unlike `subway`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Price {
    pub currency: String,
    pub amount: f64,
    pub tax: f64,
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Area {
    pub unit: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClimbingTypes {
    pub boulder: bool,
    pub top_rope: bool,
    pub lead: bool,
    pub auto_belay: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Boards {
    pub moon_board: bool,
    pub kilter_board: bool,
}

fn flag(value: i64) -> bool {
    value != 0
}

impl From<GymRow> for Gym {
    fn from(row: GymRow) -> Self {
        let subway = match (row.subway_line, row.subway_station) {
            (Some(line), Some(station)) if !line.is_empty() && !station.is_empty() => {
                Some(Subway { line, station })
            }
            _ => None,
        };

        Gym {
            id: row.id,
            name: row.name,
            city: row.city,
            address: row.address,
            map_url: row.map_url,
            place_id: row.place_id,
            coordinates: Coordinates {
                latitude: row.latitude,
                longitude: row.longitude,
            },
            public_transport: PublicTransport {
                subway,
                bus_or_tram: flag(row.bus_tram),
            },
            website_url: row.website_url,
            price: Price {
                currency: row.price_currency,
                amount: row.price_amount,
                tax: row.price_tax,
                source_url: row.price_source_url,
            },
            icon_url: row.icon_url,
            image_url: row.image_url,
            area: Area {
                unit: row.area_unit,
                value: row.area_value,
            },
            climbing_types: ClimbingTypes {
                boulder: flag(row.boulder),
                top_rope: flag(row.top_rope),
                lead: flag(row.lead),
                auto_belay: flag(row.auto_belay),
            },
            boards: Boards {
                moon_board: flag(row.moon_board),
                kilter_board: flag(row.kilter_board),
            },
        }
    }
}
