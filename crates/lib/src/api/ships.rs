//! Ship listing.
//!
//! The listing endpoint is a mocked, static lookup: responses come from an
//! in-crate catalog with offset/limit paging. The reported fleet total is
//! the backend's full count, which is larger than the catalog itself.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Result;

/// Fleet size the real backend reports; the local catalog is a sample.
const FLEET_TOTAL: u64 = 518;

/// One ship as the listing backend describes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    pub id: i64,
    pub name: String,
    pub cruise_line: String,
    /// IMO registration number; yachts and small vessels may lack one.
    pub imo_number: Option<i64>,
    pub display_name: String,
    pub mmsi: i64,
}

/// Pagination window for [`fetch_ships`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchShipsOptions {
    pub offset: usize,
    pub limit: usize,
}

/// Paged ship listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchShipsResponse {
    pub total_ship_count: u64,
    pub ships: Vec<Ship>,
}

/// Fetch a page of available ships.
pub async fn fetch_ships(options: FetchShipsOptions) -> Result<FetchShipsResponse> {
    let catalog = catalog();
    let ships: Vec<Ship> = catalog
        .into_iter()
        .skip(options.offset)
        .take(options.limit)
        .collect();

    debug!(
        offset = options.offset,
        limit = options.limit,
        returned = ships.len(),
        "ship listing served from catalog"
    );

    Ok(FetchShipsResponse {
        total_ship_count: FLEET_TOTAL,
        ships,
    })
}

fn ship(
    id: i64,
    name: &str,
    cruise_line: &str,
    imo_number: Option<i64>,
    display_name: &str,
    mmsi: i64,
) -> Ship {
    Ship {
        id,
        name: name.to_string(),
        cruise_line: cruise_line.to_string(),
        imo_number,
        display_name: display_name.to_string(),
        mmsi,
    }
}

fn catalog() -> Vec<Ship> {
    vec![
        ship(
            2,
            "ADORA MEDITERRANEA",
            "Adora Cruises Carnival China",
            Some(9237345),
            "ADORA MEDITERRANEA - Adora Cruises Carnival China",
            311001086,
        ),
        ship(
            8,
            "AIDADIVA",
            "AIDA Cruises",
            Some(9334856),
            "AIDADIVA - AIDA Cruises",
            247187700,
        ),
        ship(
            505,
            "CELEBRITY ASCENT",
            "Celebrity Cruises",
            Some(9838383),
            "CELEBRITY ASCENT - Celebrity Cruises",
            256191000,
        ),
        ship(
            513,
            "EXPEDITION C",
            "[yacht]",
            None,
            "EXPEDITION C",
            378111899,
        ),
        ship(
            396,
            "MV WORLD ODYSSEY",
            "Semester at Sea",
            Some(9141807),
            "MV WORLD ODYSSEY - Semester at Sea",
            311000410,
        ),
        ship(
            3,
            "COSTA ATLANTICA",
            "Adora Cruises Carnival China",
            Some(9187796),
            "COSTA ATLANTICA - Adora Cruises Carnival China",
            311001063,
        ),
        ship(
            500,
            "SILVER RAY",
            "Silversea Cruises",
            Some(9886225),
            "SILVER RAY - Silversea Cruises",
            311001496,
        ),
        ship(
            17,
            "ADMIRALTY DREAM",
            "Alaskan Dream Cruises",
            Some(8963727),
            "ADMIRALTY DREAM - Alaskan Dream Cruises",
            367486470,
        ),
        ship(
            18,
            "ALASKAN DREAM",
            "Alaskan Dream Cruises",
            Some(8978679),
            "ALASKAN DREAM - Alaskan Dream Cruises",
            367489250,
        ),
        ship(
            19,
            "BARANOF DREAM",
            "Alaskan Dream Cruises",
            Some(8963715),
            "BARANOF DREAM - Alaskan Dream Cruises",
            367573580,
        ),
    ]
}
