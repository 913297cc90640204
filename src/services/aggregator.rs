// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Match-history aggregation: the year-in-review core.
//!
//! [`aggregate`] reduces an ordered slice of per-match records into one
//! [`PlayerYearSummary`] in a single linear pass plus one sort of the
//! per-champion counts. It is pure and deterministic: identical input
//! (including order) yields identical output, so it is safe to call
//! concurrently for different requests with no coordination.

use crate::models::match_stats::MatchParticipantStat;
use crate::models::summary::{
    ChampionCount, ChampionDetail, GameHighlight, MonthActivity, PlayerYearSummary,
    TemporalInsights, TimeOfDay, WeekdayActivity,
};
use crate::time_utils::{MONTH_LABELS, WEEKDAY_LABELS};
use chrono::{Datelike, FixedOffset, Offset, Timelike, Utc};

/// Default number of top champions kept in the summary.
pub const DEFAULT_TOP_N: usize = 5;

/// Per-champion detail rows are capped independently of `top_n`.
const CHAMPION_DETAIL_LIMIT: usize = 10;

/// Tuning knobs for one aggregation run.
#[derive(Debug, Clone)]
pub struct AggregateOptions {
    /// How many entries to keep in `top_champions`.
    pub top_n: usize,
    /// Minutes east of UTC applied before temporal bucketing
    /// (JS `-getTimezoneOffset()` convention).
    pub utc_offset_minutes: i32,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            utc_offset_minutes: 0,
        }
    }
}

/// Aggregation failures. Empty input is NOT an error; a malformed record is
/// fatal to the whole call so the caller never sees a partial summary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AggregateError {
    #[error("match record {index}: field `{field}` is negative ({value})")]
    MalformedRecord {
        index: usize,
        field: &'static str,
        value: i64,
    },
}

/// Running per-champion sums, kept in first-encountered order.
struct ChampionAcc {
    name: String,
    games: u32,
    wins: u32,
    kills: i64,
    deaths: i64,
    assists: i64,
}

/// Reduce `matches` into a single year-in-review summary.
///
/// One pass accumulates every counter; all ratios are then derived from the
/// accumulated sums with mandatory division guards (`max(deaths, 1)`,
/// `total_games > 0`), so no field is ever negative or non-finite.
pub fn aggregate(
    matches: &[MatchParticipantStat],
    options: &AggregateOptions,
) -> Result<PlayerYearSummary, AggregateError> {
    let offset =
        FixedOffset::east_opt(options.utc_offset_minutes * 60).unwrap_or_else(|| Utc.fix());

    let mut wins: u32 = 0;
    let mut sum_kills: i64 = 0;
    let mut sum_deaths: i64 = 0;
    let mut sum_assists: i64 = 0;
    let mut sum_duration_seconds: i64 = 0;
    let mut pentakills: u32 = 0;
    let mut quadrakills: u32 = 0;
    let mut triplekills: u32 = 0;
    let mut ranked_games: u32 = 0;

    let mut champions: Vec<ChampionAcc> = Vec::new();
    let mut best_game: Option<GameHighlight> = None;
    let mut worst_game: Option<GameHighlight> = None;

    let mut month_counts = [0u32; 12];
    let mut weekday_counts = [0u32; 7];
    let mut time_of_day_counts = [0u32; 4];

    for (index, stat) in matches.iter().enumerate() {
        if let Some((field, value)) = stat.first_invalid_field() {
            return Err(AggregateError::MalformedRecord {
                index,
                field,
                value,
            });
        }

        if stat.win {
            wins += 1;
        }
        sum_kills += i64::from(stat.kills);
        sum_deaths += i64::from(stat.deaths);
        sum_assists += i64::from(stat.assists);
        sum_duration_seconds += stat.duration_seconds;
        pentakills += stat.penta_kills as u32;
        quadrakills += stat.quadra_kills as u32;
        triplekills += stat.triple_kills as u32;
        if stat.is_ranked() {
            ranked_games += 1;
        }

        match champions
            .iter_mut()
            .find(|c| c.name == stat.champion_name)
        {
            Some(acc) => {
                acc.games += 1;
                acc.wins += u32::from(stat.win);
                acc.kills += i64::from(stat.kills);
                acc.deaths += i64::from(stat.deaths);
                acc.assists += i64::from(stat.assists);
            }
            None => champions.push(ChampionAcc {
                name: stat.champion_name.clone(),
                games: 1,
                wins: u32::from(stat.win),
                kills: i64::from(stat.kills),
                deaths: i64::from(stat.deaths),
                assists: i64::from(stat.assists),
            }),
        }

        let kda = stat.kda();
        if stat.win {
            let better = match &best_game {
                None => true,
                Some(best) => {
                    kda > best.kda || (kda == best.kda && stat.timestamp < best.timestamp)
                }
            };
            if better {
                best_game = Some(highlight(stat, kda));
            }
        }
        let worse = match &worst_game {
            None => true,
            Some(worst) => kda < worst.kda || (kda == worst.kda && stat.timestamp < worst.timestamp),
        };
        if worse {
            worst_game = Some(highlight(stat, kda));
        }

        let local = stat.timestamp.with_timezone(&offset);
        month_counts[local.month0() as usize] += 1;
        weekday_counts[local.weekday().num_days_from_monday() as usize] += 1;
        let bucket = TimeOfDay::ALL
            .iter()
            .position(|&b| b == TimeOfDay::from_hour(local.hour()))
            .unwrap_or(0);
        time_of_day_counts[bucket] += 1;
    }

    let total_games = matches.len() as u32;
    let losses = total_games - wins;

    // Everything below is pure arithmetic on the accumulated sums; the
    // input slice is never traversed again.
    let (winrate_percent, avg_kills, avg_deaths, avg_assists) = if total_games > 0 {
        let games = f64::from(total_games);
        (
            100.0 * f64::from(wins) / games,
            sum_kills as f64 / games,
            sum_deaths as f64 / games,
            sum_assists as f64 / games,
        )
    } else {
        (0.0, 0.0, 0.0, 0.0)
    };
    let avg_kda = (sum_kills + sum_assists) as f64 / sum_deaths.max(1) as f64;
    let total_playtime_minutes = sum_duration_seconds as f64 / 60.0;

    let mut top_champions: Vec<ChampionCount> = champions
        .iter()
        .map(|c| ChampionCount {
            champion: c.name.clone(),
            games: c.games,
            splash_url: None,
            icon_url: None,
        })
        .collect();
    // Stable sort: first-encountered order wins ties.
    top_champions.sort_by(|a, b| b.games.cmp(&a.games));
    top_champions.truncate(options.top_n);

    let mut champion_details: Vec<ChampionDetail> = champions
        .iter()
        .map(|c| {
            let games = f64::from(c.games);
            ChampionDetail {
                champion: c.name.clone(),
                games: c.games,
                wins: c.wins,
                winrate_percent: 100.0 * f64::from(c.wins) / games,
                kda: (c.kills + c.assists) as f64 / c.deaths.max(1) as f64,
                avg_kills: c.kills as f64 / games,
                avg_deaths: c.deaths as f64 / games,
                avg_assists: c.assists as f64 / games,
            }
        })
        .collect();
    champion_details.sort_by(|a, b| b.games.cmp(&a.games));
    champion_details.truncate(CHAMPION_DETAIL_LIMIT);

    let temporal = (total_games > 0).then(|| {
        let month = first_max(&month_counts);
        let weekday = first_max(&weekday_counts);
        let bucket = first_max(&time_of_day_counts);
        TemporalInsights {
            most_active_month: MonthActivity {
                month: MONTH_LABELS[month].to_string(),
                games: month_counts[month],
            },
            favorite_time_of_day: TimeOfDay::ALL[bucket],
            favorite_weekday: WeekdayActivity {
                weekday: WEEKDAY_LABELS[weekday].to_string(),
                games: weekday_counts[weekday],
            },
        }
    });

    Ok(PlayerYearSummary {
        total_games,
        wins,
        losses,
        winrate_percent,
        avg_kills,
        avg_deaths,
        avg_assists,
        avg_kda,
        total_playtime_minutes,
        pentakills,
        quadrakills,
        triplekills,
        ranked_games,
        top_champions,
        champion_details,
        best_game,
        worst_game,
        temporal,
    })
}

fn highlight(stat: &MatchParticipantStat, kda: f64) -> GameHighlight {
    GameHighlight {
        champion: stat.champion_name.clone(),
        kills: stat.kills,
        deaths: stat.deaths,
        assists: stat.assists,
        kda,
        win: stat.win,
        damage_dealt: stat.damage_dealt,
        timestamp: stat.timestamp,
        splash_url: None,
    }
}

/// Index of the first maximum, so earlier buckets win ties.
fn first_max(counts: &[u32]) -> usize {
    let mut best = 0;
    for (i, &count) in counts.iter().enumerate() {
        if count > counts[best] {
            best = i;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn ts(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn match_stat(champion: &str, win: bool, k: i32, d: i32, a: i32) -> MatchParticipantStat {
        MatchParticipantStat {
            champion_name: champion.to_string(),
            kills: k,
            deaths: d,
            assists: a,
            win,
            duration_seconds: 1800,
            damage_dealt: 20_000,
            penta_kills: 0,
            quadra_kills: 0,
            triple_kills: 0,
            timestamp: Utc.with_ymd_and_hms(2025, 4, 7, 14, 0, 0).unwrap(),
            queue_id: 420,
        }
    }

    #[test]
    fn test_empty_input_is_total() {
        let summary = aggregate(&[], &AggregateOptions::default()).unwrap();

        assert_eq!(summary.total_games, 0);
        assert_eq!(summary.wins, 0);
        assert_eq!(summary.losses, 0);
        assert_eq!(summary.winrate_percent, 0.0);
        assert_eq!(summary.avg_kda, 0.0);
        assert!(summary.top_champions.is_empty());
        assert!(summary.champion_details.is_empty());
        assert!(summary.best_game.is_none());
        assert!(summary.worst_game.is_none());
        assert!(summary.temporal.is_none());
    }

    #[test]
    fn test_win_loss_totals_are_consistent() {
        let matches = vec![
            match_stat("Ahri", true, 5, 2, 10),
            match_stat("Jinx", false, 1, 5, 3),
            match_stat("Ahri", true, 3, 3, 3),
        ];
        let summary = aggregate(&matches, &AggregateOptions::default()).unwrap();

        assert_eq!(summary.total_games, 3);
        assert_eq!(summary.wins + summary.losses, summary.total_games);
        assert_eq!(summary.wins, 2);
    }

    #[test]
    fn test_avg_kda_floors_deaths() {
        // Perfect record: zero deaths across the board must stay finite.
        let matches = vec![match_stat("Ahri", true, 10, 0, 5)];
        let summary = aggregate(&matches, &AggregateOptions::default()).unwrap();

        assert_eq!(summary.avg_kda, 15.0);
        assert!(summary.avg_kda.is_finite());
    }

    #[test]
    fn test_top_champions_order_and_truncation() {
        let matches = vec![
            match_stat("A", true, 1, 1, 1),
            match_stat("A", true, 1, 1, 1),
            match_stat("B", true, 1, 1, 1),
            match_stat("B", true, 1, 1, 1),
            match_stat("B", true, 1, 1, 1),
            match_stat("C", true, 1, 1, 1),
        ];
        let options = AggregateOptions {
            top_n: 2,
            ..Default::default()
        };
        let summary = aggregate(&matches, &options).unwrap();

        assert_eq!(summary.top_champions.len(), 2);
        assert_eq!(summary.top_champions[0].champion, "B");
        assert_eq!(summary.top_champions[0].games, 3);
        assert_eq!(summary.top_champions[1].champion, "A");
        assert_eq!(summary.top_champions[1].games, 2);
    }

    #[test]
    fn test_top_champion_tie_breaks_to_first_encountered() {
        let matches = vec![match_stat("X", true, 1, 1, 1), match_stat("Y", true, 1, 1, 1)];
        let options = AggregateOptions {
            top_n: 1,
            ..Default::default()
        };
        let summary = aggregate(&matches, &options).unwrap();

        assert_eq!(summary.top_champions[0].champion, "X");
        assert_eq!(summary.top_champions[0].games, 1);
    }

    #[test]
    fn test_best_game_is_highest_kda_win() {
        let matches = vec![
            match_stat("A", true, 2, 2, 0),  // KDA 1.0
            match_stat("B", true, 10, 2, 0), // KDA 5.0
            match_stat("C", true, 4, 2, 0),  // KDA 2.0
        ];
        let summary = aggregate(&matches, &AggregateOptions::default()).unwrap();

        let best = summary.best_game.unwrap();
        assert_eq!(best.champion, "B");
        assert_eq!(best.kda, 5.0);
        let worst = summary.worst_game.unwrap();
        assert_eq!(worst.champion, "A");
    }

    #[test]
    fn test_best_game_requires_a_win() {
        let matches = vec![
            match_stat("A", false, 20, 1, 5), // monster KDA, but a loss
            match_stat("B", true, 2, 2, 0),
        ];
        let summary = aggregate(&matches, &AggregateOptions::default()).unwrap();

        assert_eq!(summary.best_game.unwrap().champion, "B");
        // Worst is picked among all matches, wins included.
        assert_eq!(summary.worst_game.unwrap().champion, "B");
    }

    #[test]
    fn test_no_wins_means_no_best_game() {
        let matches = vec![match_stat("A", false, 8, 2, 4)];
        let summary = aggregate(&matches, &AggregateOptions::default()).unwrap();

        assert!(summary.best_game.is_none());
        assert_eq!(summary.worst_game.unwrap().champion, "A");
    }

    #[test]
    fn test_best_game_kda_tie_breaks_to_earliest() {
        let mut early = match_stat("Early", true, 4, 2, 0);
        early.timestamp = ts("2025-02-01T10:00:00Z");
        let mut late = match_stat("Late", true, 4, 2, 0);
        late.timestamp = ts("2025-06-01T10:00:00Z");

        // Later timestamp first in input order: earliest must still win.
        let summary = aggregate(
            &[late.clone(), early.clone()],
            &AggregateOptions::default(),
        )
        .unwrap();
        assert_eq!(summary.best_game.unwrap().champion, "Early");

        let summary = aggregate(&[early, late], &AggregateOptions::default()).unwrap();
        assert_eq!(summary.best_game.unwrap().champion, "Early");
    }

    #[test]
    fn test_malformed_record_fails_whole_call() {
        let mut bad = match_stat("A", true, 1, 1, 1);
        bad.kills = -1;
        let matches = vec![match_stat("B", true, 1, 1, 1), bad];

        let err = aggregate(&matches, &AggregateOptions::default()).unwrap_err();
        assert_eq!(
            err,
            AggregateError::MalformedRecord {
                index: 1,
                field: "kills",
                value: -1,
            }
        );
    }

    #[test]
    fn test_month_tie_breaks_to_calendar_order() {
        let mut march = match_stat("A", true, 1, 1, 1);
        march.timestamp = ts("2025-03-10T10:00:00Z");
        let mut july = match_stat("A", true, 1, 1, 1);
        july.timestamp = ts("2025-07-10T10:00:00Z");

        let summary = aggregate(&[july, march], &AggregateOptions::default()).unwrap();
        let temporal = summary.temporal.unwrap();
        assert_eq!(temporal.most_active_month.month, "March");
        assert_eq!(temporal.most_active_month.games, 1);
    }

    #[test]
    fn test_time_of_day_tie_breaks_to_declaration_order() {
        let mut evening = match_stat("A", true, 1, 1, 1);
        evening.timestamp = ts("2025-03-10T20:00:00Z");
        let mut morning = match_stat("A", true, 1, 1, 1);
        morning.timestamp = ts("2025-03-11T08:00:00Z");

        let summary = aggregate(&[evening, morning], &AggregateOptions::default()).unwrap();
        assert_eq!(
            summary.temporal.unwrap().favorite_time_of_day,
            TimeOfDay::Morning
        );
    }

    #[test]
    fn test_utc_offset_shifts_buckets() {
        // 23:30 UTC on a Monday is 01:30 Tuesday at UTC+2.
        let mut m = match_stat("A", true, 1, 1, 1);
        m.timestamp = ts("2025-03-10T23:30:00Z"); // Monday

        let utc = aggregate(&[m.clone()], &AggregateOptions::default())
            .unwrap()
            .temporal
            .unwrap();
        assert_eq!(utc.favorite_weekday.weekday, "Monday");
        assert_eq!(utc.favorite_time_of_day, TimeOfDay::Evening);

        let shifted = aggregate(
            &[m],
            &AggregateOptions {
                utc_offset_minutes: 120,
                ..Default::default()
            },
        )
        .unwrap()
        .temporal
        .unwrap();
        assert_eq!(shifted.favorite_weekday.weekday, "Tuesday");
        assert_eq!(shifted.favorite_time_of_day, TimeOfDay::LateNight);
    }

    #[test]
    fn test_champion_details_derive_from_sums() {
        let matches = vec![
            match_stat("Ahri", true, 5, 2, 10),
            match_stat("Ahri", false, 1, 4, 3),
        ];
        let summary = aggregate(&matches, &AggregateOptions::default()).unwrap();

        assert_eq!(summary.champion_details.len(), 1);
        let detail = &summary.champion_details[0];
        assert_eq!(detail.games, 2);
        assert_eq!(detail.wins, 1);
        assert_eq!(detail.winrate_percent, 50.0);
        assert_eq!(detail.kda, (6.0 + 13.0) / 6.0);
        assert_eq!(detail.avg_kills, 3.0);
    }

    #[test]
    fn test_multikills_and_ranked_counted() {
        let mut a = match_stat("A", true, 1, 1, 1);
        a.penta_kills = 1;
        a.triple_kills = 2;
        let mut b = match_stat("B", false, 1, 1, 1);
        b.quadra_kills = 1;
        b.queue_id = 450; // ARAM

        let summary = aggregate(&[a, b], &AggregateOptions::default()).unwrap();
        assert_eq!(summary.pentakills, 1);
        assert_eq!(summary.quadrakills, 1);
        assert_eq!(summary.triplekills, 2);
        assert_eq!(summary.ranked_games, 1);
    }
}
