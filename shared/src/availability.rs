//! Availability aggregation
//!
//! The backend returns a flat list of occupied dates per room. The views need
//! three shapes derived from it:
//!
//! - [`build_grid`]: room × date matrix for the availability calendar
//! - [`booking_summaries`]: one line per booking seen in the window
//! - [`dashboard_stats`]: today's counters for the dashboard cards
//!
//! Records with a date that is not `YYYY-MM-DD` are ignored.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AvailabilityResponse, BookingStatus, OccupiedDate, Room, RoomStatus};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a wire date
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Every date from `from` to `to`, both inclusive. Empty when `from > to`.
pub fn date_range(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    from.iter_days().take_while(|d| *d <= to).collect()
}

/// State of one room on one date
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CellState {
    Available,
    Occupied {
        booking_id: Option<i64>,
        booking_status: Option<BookingStatus>,
        label: String,
    },
    Maintenance {
        label: String,
    },
}

impl CellState {
    fn from_record(od: &OccupiedDate) -> Self {
        let label = cell_label(od);
        if od.is_maintenance() {
            CellState::Maintenance { label }
        } else {
            CellState::Occupied {
                booking_id: od.booking_id,
                booking_status: od.booking_status,
                label,
            }
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, CellState::Available)
    }
}

/// Reason if given, else booking status, else raw status
fn cell_label(od: &OccupiedDate) -> String {
    if let Some(reason) = od.reason.as_deref().filter(|r| !r.is_empty()) {
        return reason.to_string();
    }
    if let Some(status) = od.booking_status {
        return status.as_str().to_string();
    }
    od.status.clone()
}

#[derive(Debug, Clone, Serialize)]
pub struct GridCell {
    pub date: NaiveDate,
    pub state: CellState,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomRow {
    pub room_id: i64,
    pub room_number: String,
    pub cells: Vec<GridCell>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoomTypeGrid {
    pub room_type_id: i64,
    pub room_type_name: String,
    pub rooms: Vec<RoomRow>,
}

/// Availability calendar: one column per date, one row per room
#[derive(Debug, Clone, Serialize)]
pub struct AvailabilityGrid {
    pub dates: Vec<NaiveDate>,
    pub room_types: Vec<RoomTypeGrid>,
}

impl AvailabilityGrid {
    pub fn is_empty(&self) -> bool {
        self.room_types.is_empty()
    }
}

/// Build the calendar for `[from, to]`
///
/// When a room has several records for the same date the last one wins.
pub fn build_grid(
    availability: &AvailabilityResponse,
    from: NaiveDate,
    to: NaiveDate,
) -> AvailabilityGrid {
    let dates = date_range(from, to);

    let room_types = availability
        .room_types
        .iter()
        .map(|rt| RoomTypeGrid {
            room_type_id: rt.room_type_id,
            room_type_name: rt.room_type_name.clone(),
            rooms: rt
                .rooms
                .iter()
                .map(|room| {
                    let occupied: HashMap<NaiveDate, &OccupiedDate> = room
                        .occupied_dates
                        .iter()
                        .filter_map(|od| parse_date(&od.date).map(|d| (d, od)))
                        .collect();

                    let cells = dates
                        .iter()
                        .map(|date| GridCell {
                            date: *date,
                            state: occupied
                                .get(date)
                                .map(|od| CellState::from_record(od))
                                .unwrap_or(CellState::Available),
                        })
                        .collect();

                    RoomRow {
                        room_id: room.room_id,
                        room_number: room.room_number.clone(),
                        cells,
                    }
                })
                .collect(),
        })
        .collect();

    AvailabilityGrid { dates, room_types }
}

/// One booking as seen through its occupied dates
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingSummary {
    pub booking_id: i64,
    pub status: Option<BookingStatus>,
    pub earliest_date: NaiveDate,
    pub latest_date: NaiveDate,
    /// Distinct rooms the booking occupies in the window
    pub room_count: usize,
}

/// Collapse occupied dates into per-booking summaries, most recent first
///
/// Records without a booking id (maintenance, manual blocks) are skipped. The
/// status comes from the first record seen for a booking.
pub fn booking_summaries(availability: &AvailabilityResponse) -> Vec<BookingSummary> {
    let mut summaries: Vec<BookingSummary> = Vec::new();
    let mut index: HashMap<i64, usize> = HashMap::new();
    let mut rooms: HashMap<i64, HashSet<i64>> = HashMap::new();

    for rt in &availability.room_types {
        for room in &rt.rooms {
            for od in &room.occupied_dates {
                let Some(booking_id) = od.booking_id else {
                    continue;
                };
                let Some(date) = parse_date(&od.date) else {
                    continue;
                };

                rooms.entry(booking_id).or_default().insert(room.room_id);

                match index.get(&booking_id) {
                    Some(&i) => {
                        let s = &mut summaries[i];
                        s.earliest_date = s.earliest_date.min(date);
                        s.latest_date = s.latest_date.max(date);
                    }
                    None => {
                        index.insert(booking_id, summaries.len());
                        summaries.push(BookingSummary {
                            booking_id,
                            status: od.booking_status,
                            earliest_date: date,
                            latest_date: date,
                            room_count: 0,
                        });
                    }
                }
            }
        }
    }

    for s in &mut summaries {
        s.room_count = rooms.get(&s.booking_id).map(HashSet::len).unwrap_or(0);
    }

    summaries.sort_by(|a, b| b.earliest_date.cmp(&a.earliest_date));
    summaries
}

/// Counters shown on the dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total_rooms: usize,
    pub occupied: usize,
    pub available: usize,
    /// `MAINTENANCE` plus `OUT_OF_SERVICE`
    pub maintenance: usize,
    pub checked_in: usize,
    pub checked_out: usize,
    pub expected_arrival: usize,
    /// Checked in today with nothing booked tomorrow
    pub expected_departure: usize,
}

/// Compute dashboard counters from the room list and a today/tomorrow window
pub fn dashboard_stats(
    rooms: &[Room],
    availability: &AvailabilityResponse,
    today: NaiveDate,
) -> DashboardStats {
    let count = |pred: &dyn Fn(RoomStatus) -> bool| rooms.iter().filter(|r| pred(r.status)).count();

    let mut stats = DashboardStats {
        total_rooms: rooms.len(),
        occupied: count(&|s| s == RoomStatus::Occupied),
        available: count(&|s| s == RoomStatus::Available),
        maintenance: count(&|s| matches!(s, RoomStatus::Maintenance | RoomStatus::OutOfService)),
        ..Default::default()
    };

    let tomorrow = today.succ_opt();
    let on = |room_dates: &[OccupiedDate], day: Option<NaiveDate>| -> Option<Option<BookingStatus>> {
        let day = day?;
        room_dates
            .iter()
            .find(|od| parse_date(&od.date) == Some(day))
            .map(|od| od.booking_status)
    };

    for rt in &availability.room_types {
        for room in &rt.rooms {
            let Some(today_status) = on(&room.occupied_dates, Some(today)) else {
                continue;
            };
            let booked_tomorrow = on(&room.occupied_dates, tomorrow).is_some();

            match today_status {
                Some(BookingStatus::CheckedIn) => {
                    stats.checked_in += 1;
                    if !booked_tomorrow {
                        stats.expected_departure += 1;
                    }
                }
                Some(BookingStatus::CheckedOut) => stats.checked_out += 1,
                Some(BookingStatus::Confirmed) => stats.expected_arrival += 1,
                _ => {}
            }
        }
    }

    stats
}
