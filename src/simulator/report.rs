//! Simulation report aggregation and formatting.

use serde::Serialize;

use crate::combat::types::ExpeditionOutcome;
use crate::market::types::Satisfaction;
use crate::traffic::TrafficLevel;

/// Everything that happened in one simulated day.
#[derive(Debug, Clone, Serialize)]
pub struct DayStats {
    pub day: u32,
    pub expedition_depth: u32,
    pub expedition_outcome: ExpeditionOutcome,
    pub monsters_slain: usize,
    pub loot_recovered: usize,
    pub wares_stocked: usize,
    pub wares_warehoused: usize,
    pub visitors: usize,
    pub sales: usize,
    pub revenue: f64,
    pub profit: f64,
    pub closing_gold: f64,
    pub traffic_level: TrafficLevel,
}

/// Aggregated results from a full simulation run.
#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub days: u32,
    pub expeditions_won: u32,
    pub expeditions_retreated: u32,
    pub total_monsters_slain: usize,
    pub total_loot: usize,
    pub total_visitors: usize,
    pub total_sales: usize,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub closing_gold: f64,
    pub final_traffic_level: TrafficLevel,
    /// Sale counts per satisfaction verdict, Outraged through Delighted.
    pub satisfaction_counts: [u32; 5],
    pub day_stats: Vec<DayStats>,
}

impl SimReport {
    pub fn from_days(day_stats: Vec<DayStats>, satisfaction_counts: [u32; 5]) -> Self {
        let days = day_stats.len() as u32;
        let expeditions_won = day_stats
            .iter()
            .filter(|d| d.expedition_outcome == ExpeditionOutcome::Victory)
            .count() as u32;

        Self {
            days,
            expeditions_won,
            expeditions_retreated: days - expeditions_won,
            total_monsters_slain: day_stats.iter().map(|d| d.monsters_slain).sum(),
            total_loot: day_stats.iter().map(|d| d.loot_recovered).sum(),
            total_visitors: day_stats.iter().map(|d| d.visitors).sum(),
            total_sales: day_stats.iter().map(|d| d.sales).sum(),
            total_revenue: day_stats.iter().map(|d| d.revenue).sum(),
            total_profit: day_stats.iter().map(|d| d.profit).sum(),
            closing_gold: day_stats.last().map(|d| d.closing_gold).unwrap_or(0.0),
            final_traffic_level: day_stats
                .last()
                .map(|d| d.traffic_level)
                .unwrap_or(TrafficLevel::Dead),
            satisfaction_counts,
            day_stats,
        }
    }

    /// Fraction of visitors who left with a purchase.
    pub fn conversion_rate(&self) -> f64 {
        if self.total_visitors == 0 {
            0.0
        } else {
            self.total_sales as f64 / self.total_visitors as f64
        }
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str("=== SIMULATION SUMMARY ===\n");
        out.push_str(&format!("Days simulated:     {}\n", self.days));
        out.push_str(&format!(
            "Expeditions:        {} won / {} retreated\n",
            self.expeditions_won, self.expeditions_retreated
        ));
        out.push_str(&format!("Monsters slain:     {}\n", self.total_monsters_slain));
        out.push_str(&format!("Loot recovered:     {}\n", self.total_loot));
        out.push_str(&format!("Visitors:           {}\n", self.total_visitors));
        out.push_str(&format!(
            "Sales:              {} ({:.1}% conversion)\n",
            self.total_sales,
            self.conversion_rate() * 100.0
        ));
        out.push_str(&format!("Revenue:            {:.2}\n", self.total_revenue));
        out.push_str(&format!("Profit:             {:.2}\n", self.total_profit));
        out.push_str(&format!("Closing gold:       {:.2}\n", self.closing_gold));
        out.push_str(&format!(
            "Final traffic:      {}\n",
            self.final_traffic_level.name()
        ));

        out.push_str("Satisfaction:       ");
        let labels = [
            Satisfaction::Outraged,
            Satisfaction::Disappointed,
            Satisfaction::Neutral,
            Satisfaction::Pleased,
            Satisfaction::Delighted,
        ];
        for (label, count) in labels.iter().zip(self.satisfaction_counts) {
            out.push_str(&format!("{} {}  ", label.name(), count));
        }
        out.push('\n');
        out
    }

    pub fn day_detail_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Day | Depth | Exped    | Slain | Loot | Visits | Sales | Revenue | Gold\n");
        for d in &self.day_stats {
            out.push_str(&format!(
                "{:>3} | {:>5} | {:<8} | {:>5} | {:>4} | {:>6} | {:>5} | {:>7.1} | {:>7.1}\n",
                d.day,
                d.expedition_depth,
                match d.expedition_outcome {
                    ExpeditionOutcome::Victory => "victory",
                    ExpeditionOutcome::Retreat => "retreat",
                },
                d.monsters_slain,
                d.loot_recovered,
                d.visitors,
                d.sales,
                d.revenue,
                d.closing_gold,
            ));
        }
        out
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(day: u32, outcome: ExpeditionOutcome, sales: usize, revenue: f64) -> DayStats {
        DayStats {
            day,
            expedition_depth: 1,
            expedition_outcome: outcome,
            monsters_slain: 3,
            loot_recovered: 1,
            wares_stocked: 1,
            wares_warehoused: 0,
            visitors: 5,
            sales,
            revenue,
            profit: revenue * 0.4,
            closing_gold: 200.0 + revenue,
            traffic_level: TrafficLevel::Steady,
        }
    }

    #[test]
    fn test_report_aggregates_days() {
        let report = SimReport::from_days(
            vec![
                day(1, ExpeditionOutcome::Victory, 2, 100.0),
                day(2, ExpeditionOutcome::Retreat, 1, 50.0),
            ],
            [0, 1, 0, 2, 0],
        );

        assert_eq!(report.days, 2);
        assert_eq!(report.expeditions_won, 1);
        assert_eq!(report.expeditions_retreated, 1);
        assert_eq!(report.total_sales, 3);
        assert_eq!(report.total_visitors, 10);
        assert_eq!(report.total_revenue, 150.0);
        assert!((report.conversion_rate() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_empty_report_is_sane() {
        let report = SimReport::from_days(Vec::new(), [0; 5]);
        assert_eq!(report.days, 0);
        assert_eq!(report.conversion_rate(), 0.0);
        assert_eq!(report.final_traffic_level, TrafficLevel::Dead);
    }

    #[test]
    fn test_text_and_json_render() {
        let report = SimReport::from_days(
            vec![day(1, ExpeditionOutcome::Victory, 2, 100.0)],
            [0, 0, 1, 1, 0],
        );
        let text = report.to_text();
        assert!(text.contains("SIMULATION SUMMARY"));
        assert!(text.contains("Sales:"));

        let json = report.to_json();
        assert!(json.contains("\"total_sales\": 2"));
    }
}
