use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use swimrank::bests::{SeasonalEventBests, StoragePlan};
use swimrank::model::{Recordable, ResultRecord, Season, SwimmerId};
use swimrank::ranking::{BalancedCategoryRanking, EnhancedCategoryRanking};
use swimrank::records::{RecordBoard, RecordCollection};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn align_right(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

fn swimmer_name(season: &Season, id: SwimmerId) -> String {
    season
        .swimmer(id)
        .map(|s| s.complete_name.clone())
        .unwrap_or_else(|| format!("#{}", id))
}

pub fn print_records(season: &Season, collection: &RecordCollection<ResultRecord>) {
    println!("\n🏆 {} records ({})", collection.len(), collection.default_type());
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Key").add_attribute(Attribute::Bold),
        Cell::new("Swimmer"),
        Cell::new("Time").fg(Color::Cyan),
        Cell::new("Date"),
        Cell::new("Result"),
    ]);

    let mut rows: Vec<_> = collection.entries().collect();
    rows.sort_by(|a, b| a.0.cmp(b.0));
    for (key, entry) in rows {
        let key_cell = if key.is_tie {
            Cell::new(key.encode()).fg(Color::Yellow)
        } else {
            Cell::new(key.encode())
        };
        table.add_row(vec![
            key_cell,
            Cell::new(swimmer_name(season, entry.record.swimmer_id())),
            Cell::new(entry.record.timing()),
            Cell::new(entry.record.event_date),
            Cell::new(entry.record.id),
        ]);
    }
    align_right(&mut table, 2, 4);
    println!("{}", table);
    println!("cache key: {}", collection.cache_key());
}

pub fn print_seasonal_bests(bests: &SeasonalEventBests) {
    println!(
        "\n⏱️  Seasonal event bests for season #{} (pool {})",
        bests.season_id(),
        bests.reference_pool()
    );
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Gender").add_attribute(Attribute::Bold),
        Cell::new("Category"),
        Cell::new("Event"),
        Cell::new("Best").fg(Color::Cyan),
        Cell::new("Conv."),
        Cell::new("Offered"),
        Cell::new("Swam"),
    ]);

    for best in bests.iter() {
        let converted = if best.is_converted { "yes" } else { "" };
        table.add_row(vec![
            Cell::new(best.gender),
            Cell::new(&best.category),
            Cell::new(best.event),
            Cell::new(best.timing),
            Cell::new(format!("{} ({})", converted, best.conversions)),
            Cell::new(best.total_events),
            Cell::new(best.events_swam),
        ]);
    }
    align_right(&mut table, 3, 6);
    println!("{}", table);
}

pub fn print_balanced_ranking(season: &Season, ranking: &BalancedCategoryRanking) {
    println!("\n📊 Balanced ranking {} {}", ranking.gender, ranking.category);
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Swimmer"),
        Cell::new("Meetings"),
        Cell::new("Best meeting"),
        Cell::new("Total").fg(Color::Green),
    ]);

    for (pos, score) in ranking.sorted_scores().into_iter().enumerate() {
        let best = score
            .meeting_scores()
            .map(|m| m.get_total_points())
            .fold(0.0, f64::max);
        table.add_row(vec![
            Cell::new(pos + 1),
            Cell::new(swimmer_name(season, score.swimmer_id)),
            Cell::new(score.meeting_count()),
            Cell::new(format!("{:.2}", best)),
            Cell::new(format!("{:.2}", score.total_best_5_on_6())).add_attribute(Attribute::Bold),
        ]);
    }
    align_right(&mut table, 2, 4);
    println!("{}", table);
}

pub fn print_enhanced_ranking(season: &Season, ranking: &EnhancedCategoryRanking) {
    println!("\n📈 Enhanced ranking {} {}", ranking.gender, ranking.category);
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Swimmer"),
        Cell::new("Meetings"),
        Cell::new("Perf."),
        Cell::new("Enh.").fg(Color::Yellow),
        Cell::new("Total").fg(Color::Green),
    ]);

    for (pos, score) in ranking.sorted_scores().into_iter().enumerate() {
        let (perf, enhance) = score
            .meeting_scores()
            .fold((0.0, 0.0), |(p, e), m| (p + m.performance_points, e + m.enhance_points));
        table.add_row(vec![
            Cell::new(pos + 1),
            Cell::new(swimmer_name(season, score.swimmer_id)),
            Cell::new(score.meeting_count()),
            Cell::new(format!("{:.2}", perf)),
            Cell::new(format!("{:.2}", enhance)),
            Cell::new(format!("{:.2}", score.total_best_5_on_6())).add_attribute(Attribute::Bold),
        ]);
    }
    align_right(&mut table, 2, 5);
    println!("{}", table);
}

pub fn print_storage_plan(plan: &StoragePlan) {
    println!(
        "\n🗂️  Time standards: {} to insert, {} to update",
        plan.to_insert.len(),
        plan.to_update.len()
    );
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Op").add_attribute(Attribute::Bold),
        Cell::new("Gender"),
        Cell::new("Category"),
        Cell::new("Event"),
        Cell::new("Pool"),
        Cell::new("Standard").fg(Color::Cyan),
    ]);

    let ops = plan
        .to_insert
        .iter()
        .map(|s| ("insert", s))
        .chain(plan.to_update.iter().map(|s| ("update", s)));
    for (op, standard) in ops {
        table.add_row(vec![
            Cell::new(op),
            Cell::new(standard.key.gender),
            Cell::new(&standard.key.category),
            Cell::new(standard.key.event),
            Cell::new(standard.key.pool),
            Cell::new(standard.timing),
        ]);
    }
    align_right(&mut table, 5, 5);
    println!("{}", table);
}

pub fn print_board(season: &Season, board: &RecordBoard) {
    println!(
        "\n📋 {} board for {}: {} records",
        board.record_type(),
        board.owner(),
        board.record_count()
    );
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Pool").add_attribute(Attribute::Bold),
        Cell::new("Gender"),
        Cell::new("Event"),
        Cell::new("Category"),
        Cell::new("Swimmer"),
        Cell::new("Time").fg(Color::Cyan),
    ]);

    let mut entries: Vec<_> = board.entries().collect();
    entries.sort_by(|a, b| a.slot.cmp(&b.slot));
    for entry in entries {
        table.add_row(vec![
            Cell::new(entry.slot.pool),
            Cell::new(entry.slot.gender),
            Cell::new(entry.slot.event),
            Cell::new(&entry.slot.category),
            Cell::new(swimmer_name(season, entry.record.swimmer_id)),
            Cell::new(entry.record.timing),
        ]);
    }
    align_right(&mut table, 5, 5);
    println!("{}", table);
}
