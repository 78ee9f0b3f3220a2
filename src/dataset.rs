use crate::collaborators::InMemoryPersonalStandards;
use crate::error::{EngineError, EngineResult};
use crate::model::{
    CategoryCode, EventType, Gender, MeetingId, PoolType, ResultRecord, Season, SeasonId, SwimmerId, TeamId,
    Timing,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;
use std::fs::{self, File};
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads a season snapshot (meetings, swimmers, teams and results) from JSON.
pub fn load_season<P: AsRef<Path>>(path: P) -> EngineResult<Season> {
    let path = path.as_ref();
    info!("Loading season from: {}", path.display());
    let content = fs::read_to_string(path)?;
    let season: Season = serde_json::from_str(&content)?;
    if season.begin_date > season.end_date {
        return Err(EngineError::Parse(format!(
            "Season #{} ends ({}) before it begins ({})",
            season.id, season.end_date, season.begin_date
        )));
    }
    debug!(
        "Season #{}: {} meetings, {} swimmers, {} results",
        season.id,
        season.meetings.len(),
        season.swimmers.len(),
        season.results.len()
    );
    Ok(season)
}

#[derive(Debug, Deserialize)]
struct ResultRow {
    id: u64,
    swimmer_id: SwimmerId,
    #[serde(default)]
    team_id: TeamId,
    #[serde(default)]
    season_id: SeasonId,
    #[serde(default)]
    meeting_id: MeetingId,
    event_date: NaiveDate,
    event_type: String,
    category: String,
    gender: String,
    pool: String,
    timing: String,
    #[serde(default)]
    rank: u32,
    #[serde(default)]
    is_disqualified: bool,
    #[serde(default)]
    is_out_of_race: bool,
    #[serde(default)]
    event_points: f64,
    #[serde(default)]
    updated_at: Option<NaiveDateTime>,
}

impl ResultRow {
    fn into_record(self) -> EngineResult<ResultRecord> {
        let gender: Gender = self
            .gender
            .trim()
            .parse()
            .map_err(|_| EngineError::Parse(format!("Unknown gender '{}'", self.gender)))?;
        let pool: PoolType = self
            .pool
            .trim()
            .parse()
            .map_err(|_| EngineError::Parse(format!("Unknown pool '{}'", self.pool)))?;
        let event_type: EventType = self.event_type.trim().parse()?;
        let timing: Timing = self.timing.trim().parse()?;

        Ok(ResultRecord::builder()
            .id(self.id)
            .swimmer_id(self.swimmer_id)
            .team_id(self.team_id)
            .season_id(self.season_id)
            .meeting_id(self.meeting_id)
            .event_date(self.event_date)
            .event_type(event_type)
            .category(CategoryCode::new(self.category.trim()))
            .gender(gender)
            .pool(pool)
            .timing(timing)
            .rank(self.rank)
            .is_disqualified(self.is_disqualified)
            .is_out_of_race(self.is_out_of_race)
            .event_points(self.event_points)
            .updated_at(self.updated_at.unwrap_or(NaiveDateTime::MIN))
            .build())
    }
}

/// Loads result rows from a headed CSV file. Malformed rows are skipped.
pub fn load_results_csv<P: AsRef<Path>>(path: P) -> EngineResult<Vec<ResultRecord>> {
    let path = path.as_ref();
    info!("Loading results from: {}", path.display());
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut results = Vec::new();
    let mut skipped = 0;
    for (idx, row) in rdr.deserialize::<ResultRow>().enumerate() {
        match row.map_err(EngineError::from).and_then(ResultRow::into_record) {
            Ok(record) => results.push(record),
            Err(e) => {
                skipped += 1;
                warn!("[Row {}] {}", idx + 1, e);
            }
        }
    }

    if skipped > 0 {
        warn!("Skipped {} invalid rows in {}", skipped, path.display());
    }
    debug!("Loaded {} results", results.len());
    Ok(results)
}

#[derive(Debug, Deserialize)]
struct StandardRow {
    season_id: SeasonId,
    swimmer_id: SwimmerId,
    pool: String,
    event_type: String,
    timing: String,
}

/// Loads per-swimmer standards (`season_id,swimmer_id,pool,event_type,timing`).
pub fn load_personal_standards_csv<P: AsRef<Path>>(path: P) -> EngineResult<InMemoryPersonalStandards> {
    let path = path.as_ref();
    info!("Loading personal standards from: {}", path.display());
    let file = File::open(path)?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut standards = InMemoryPersonalStandards::new();
    for (idx, row) in rdr.deserialize::<StandardRow>().enumerate() {
        let parsed = row.map_err(EngineError::from).and_then(|row| {
            let pool: PoolType = row
                .pool
                .parse()
                .map_err(|_| EngineError::Parse(format!("Unknown pool '{}'", row.pool)))?;
            let event: EventType = row.event_type.parse()?;
            let timing: Timing = row.timing.parse()?;
            Ok((row.season_id, row.swimmer_id, pool, event, timing))
        });

        match parsed {
            Ok((season_id, swimmer_id, pool, event, timing)) => {
                standards.insert(season_id, swimmer_id, pool, event, timing)
            }
            Err(e) => warn!("[Row {}] {}", idx + 1, e),
        }
    }

    debug!("Loaded {} personal standards", standards.len());
    Ok(standards)
}
