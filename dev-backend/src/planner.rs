//! Planning computations.
//!
//! Cost roll-ups, strategy selection and timeline generation over a
//! store snapshot. All figures are deterministic functions of the
//! current inventory; nothing here talks to the network.

use chrono::{NaiveDate, Utc};

use common::models::analysis::{
    ComplexityLevel, ComputeCosts, CostBreakdown, CostReport, CostSummary, NetworkingCosts,
    RiskAssessment, SavingsAnalysis, StorageCosts, StrategyOverview, StrategyPhase, StrategyReport,
    TimelineOverview, TimelinePhase, TimelineReport,
};
use common::models::status::{DashboardSummary, InventoryCounts, QuickCost, QuickTimeline};

use crate::store::PlanningSnapshot;

/// Flat monthly rate per server, USD.
const SERVER_MONTHLY_RATE: f64 = 150.0;
/// Flat monthly rate per database, USD.
const DATABASE_MONTHLY_RATE: f64 = 75.0;
/// Flat monthly rate per file share, USD.
const FILE_SHARE_MONTHLY_RATE: f64 = 50.0;
/// Fixed VPN gateway cost, USD/month.
const VPN_GATEWAY_MONTHLY: f64 = 45.0;
/// Data volume migrated per week, GB.
const DATA_GB_PER_WEEK: u64 = 2000;
/// Servers migrated per week.
const SERVERS_PER_WEEK: usize = 5;

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Complexity bucket from the total workload count.
pub fn complexity_for(total_items: u32) -> ComplexityLevel {
    if total_items <= 5 {
        ComplexityLevel::Low
    } else if total_items <= 15 {
        ComplexityLevel::Medium
    } else {
        ComplexityLevel::High
    }
}

/// Builds the cost estimation report.
pub fn cost_report(snapshot: &PlanningSnapshot) -> CostReport {
    let servers = snapshot.servers.len() as f64 * SERVER_MONTHLY_RATE;
    let databases = snapshot.databases.len() as f64 * DATABASE_MONTHLY_RATE;
    let file_shares = snapshot.file_shares.len() as f64 * FILE_SHARE_MONTHLY_RATE;

    let compute_total = servers + databases;
    let backups = round2(compute_total * 0.10);
    let storage_total = round2(file_shares + backups);
    let data_transfer = round2(compute_total * 0.05);
    let networking_total = round2(data_transfer + VPN_GATEWAY_MONTHLY);

    let monthly = round2(compute_total + storage_total + networking_total);

    CostReport {
        breakdown: CostBreakdown {
            compute: ComputeCosts {
                servers,
                databases,
                monthly_total: compute_total,
            },
            storage: StorageCosts {
                file_shares,
                backups,
                monthly_total: storage_total,
            },
            networking: NetworkingCosts {
                data_transfer,
                vpn_gateway: VPN_GATEWAY_MONTHLY,
                monthly_total: networking_total,
            },
        },
        summary: CostSummary {
            monthly_cost: monthly,
            annual_cost: round2(monthly * 12.0),
            currency: "USD".to_string(),
            last_updated: Utc::now(),
        },
        savings: SavingsAnalysis {
            on_premises_estimated: round2(monthly * 1.4),
            cloud_optimized: round2(monthly * 0.85),
            potential_monthly_savings: round2(monthly * 0.55),
            roi_months: 8,
        },
        ai_insights: None,
    }
}

/// Builds the migration strategy report.
pub fn strategy_report(snapshot: &PlanningSnapshot) -> StrategyReport {
    let total = snapshot.total_items();
    let complexity = complexity_for(total);
    let duration_weeks = match complexity {
        ComplexityLevel::Low => 6,
        ComplexityLevel::Medium => 8,
        ComplexityLevel::High => 12,
    };

    let phases = vec![
        StrategyPhase {
            phase: 1,
            name: "Assessment & Planning".to_string(),
            duration_weeks: 1,
            description: "Discovery, dependency mapping and detailed planning".to_string(),
            deliverables: vec![
                "Inventory validation".to_string(),
                "Migration plan".to_string(),
                "Risk assessment".to_string(),
            ],
        },
        StrategyPhase {
            phase: 2,
            name: "Infrastructure Setup".to_string(),
            duration_weeks: 1,
            description: "Cloud environment preparation and network setup".to_string(),
            deliverables: vec![
                "Landing zone".to_string(),
                "Security configuration".to_string(),
                "Monitoring setup".to_string(),
            ],
        },
        StrategyPhase {
            phase: 3,
            name: "Migration Execution".to_string(),
            duration_weeks: duration_weeks - 4,
            description: "Migration of workloads in waves".to_string(),
            deliverables: vec![
                "Server migration".to_string(),
                "Database migration".to_string(),
                "Application testing".to_string(),
            ],
        },
        StrategyPhase {
            phase: 4,
            name: "Testing & Optimization".to_string(),
            duration_weeks: 2,
            description: "Performance validation and cost optimization".to_string(),
            deliverables: vec![
                "Performance testing".to_string(),
                "Cost optimization".to_string(),
                "Documentation".to_string(),
            ],
        },
    ];

    StrategyReport {
        overview: StrategyOverview {
            recommended_approach: "Lift and Shift with Optimization".to_string(),
            complexity_level: complexity,
            estimated_duration_weeks: duration_weeks,
            confidence_score: 85,
            total_workloads: total,
        },
        phases,
        risk_assessment: RiskAssessment {
            high_risk_items: (snapshot.databases.len() as u32).max(1),
            medium_risk_items: snapshot.servers.len() as u32,
            low_risk_items: snapshot.file_shares.len() as u32,
            mitigation_strategies: vec![
                "Parallel migration approach".to_string(),
                "Blue-green deployment strategy".to_string(),
                "Comprehensive rollback procedures".to_string(),
                "Continuous monitoring during migration".to_string(),
            ],
        },
        recommendations: vec![
            "Start with non-critical workloads for validation".to_string(),
            "Implement monitoring from day one".to_string(),
            "Plan for adequate network bandwidth".to_string(),
            "Consider cloud-native alternatives where applicable".to_string(),
            "Establish clear rollback criteria".to_string(),
        ],
        ai_insights: None,
    }
}

fn div_ceil_u64(value: u64, divisor: u64) -> u64 {
    value.div_ceil(divisor)
}

/// Builds the migration timeline report.
///
/// With an empty inventory the phase durations sum to a 16-week
/// baseline; data volume and server count stretch the middle phases.
pub fn timeline_report(snapshot: &PlanningSnapshot, start_date: Option<NaiveDate>) -> TimelineReport {
    let data_weeks = div_ceil_u64(snapshot.total_data_gb(), DATA_GB_PER_WEEK).max(2) as u32;
    let server_weeks =
        (div_ceil_u64(snapshot.servers.len() as u64, SERVERS_PER_WEEK as u64).max(2)) as u32;

    let roles: Vec<String> = if snapshot.resource_rates.is_empty() {
        vec!["Migration Engineer".to_string(), "Cloud Architect".to_string()]
    } else {
        snapshot.resource_rates.iter().map(|r| r.role.clone()).collect()
    };

    let phase_defs: [(&str, u32, &str); 7] = [
        (
            "Assessment and Planning",
            2,
            "Infrastructure assessment, dependency mapping and plan finalization",
        ),
        (
            "Environment Setup",
            2,
            "Cloud accounts, network configuration, security and monitoring",
        ),
        (
            "Pilot Migration",
            3,
            "Migrate pilot workloads, benchmark and refine the process",
        ),
        (
            "Data Migration",
            data_weeks,
            "Database and file share migration with integrity validation",
        ),
        (
            "Server Migration",
            server_weeks,
            "Replication setup and wave-based server cutover",
        ),
        (
            "Testing and Validation",
            3,
            "End-to-end, performance, security and acceptance testing",
        ),
        (
            "Cutover and Go-Live",
            2,
            "Final synchronization, DNS cutover and go-live verification",
        ),
    ];

    let total_weeks: u32 = phase_defs.iter().map(|(_, weeks, _)| weeks).sum();
    let start = start_date.unwrap_or_else(|| Utc::now().date_naive());
    let end = start
        .checked_add_days(chrono::Days::new(u64::from(total_weeks) * 7))
        .unwrap_or(start);

    let mut phases = Vec::with_capacity(phase_defs.len());
    let mut week = 1;
    for (index, (title, weeks, description)) in phase_defs.iter().enumerate() {
        phases.push(TimelinePhase {
            phase: index as u32 + 1,
            title: (*title).to_string(),
            description: (*description).to_string(),
            duration_weeks: *weeks,
            start_week: week,
            end_week: week + weeks - 1,
            milestones: vec![format!("{title} complete")],
            resources_required: roles.clone(),
        });
        week += weeks;
    }

    // Weighted workload complexity, as used for the risk buffer.
    let complexity_score = snapshot.servers.len() as f64 * 0.5
        + snapshot.databases.len() as f64 * 1.0
        + snapshot.file_shares.len() as f64 * 0.3;
    let confidence_level = if complexity_score > 20.0 {
        "Medium".to_string()
    } else {
        "High".to_string()
    };

    TimelineReport {
        overview: TimelineOverview {
            total_duration_weeks: total_weeks,
            estimated_start_date: start,
            estimated_end_date: end,
            confidence_level,
            complexity_score,
        },
        phases,
        critical_path: vec![
            "Assessment and Planning".to_string(),
            "Environment Setup".to_string(),
            "Data Migration".to_string(),
            "Testing and Validation".to_string(),
            "Cutover and Go-Live".to_string(),
        ],
        ai_insights: None,
    }
}

/// Builds the aggregated dashboard overview.
pub fn dashboard_summary(snapshot: &PlanningSnapshot) -> DashboardSummary {
    let inventory = InventoryCounts {
        servers: snapshot.servers.len() as u32,
        databases: snapshot.databases.len() as u32,
        file_shares: snapshot.file_shares.len() as u32,
    };
    let total_items = inventory.total();
    let monthly = snapshot.servers.len() as f64 * SERVER_MONTHLY_RATE
        + snapshot.databases.len() as f64 * DATABASE_MONTHLY_RATE
        + snapshot.file_shares.len() as f64 * FILE_SHARE_MONTHLY_RATE;

    DashboardSummary {
        inventory,
        total_items,
        cost: QuickCost {
            monthly_cost: monthly,
            annual_cost: monthly * 12.0,
            currency: "USD".to_string(),
        },
        timeline: QuickTimeline {
            estimated_duration_weeks: (total_items / 5 + 2).max(4),
            phases: 4,
            complexity: complexity_for(total_items),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    async fn seeded_snapshot() -> PlanningSnapshot {
        let store = Store::new();
        store.seed_sample_data().await;
        store.snapshot().await
    }

    #[tokio::test]
    async fn cost_rolls_up_per_entity_rates() {
        let snapshot = seeded_snapshot().await;
        let report = cost_report(&snapshot);
        // 5 servers, 4 databases, 3 file shares.
        assert_eq!(report.breakdown.compute.servers, 750.0);
        assert_eq!(report.breakdown.compute.databases, 300.0);
        assert_eq!(report.breakdown.compute.monthly_total, 1050.0);
        assert_eq!(report.breakdown.storage.file_shares, 150.0);
        assert_eq!(report.breakdown.storage.backups, 105.0);
        assert_eq!(report.breakdown.networking.vpn_gateway, 45.0);
        assert_eq!(
            report.summary.annual_cost,
            round2(report.summary.monthly_cost * 12.0)
        );
    }

    #[tokio::test]
    async fn empty_inventory_has_sixteen_week_baseline() {
        let store = Store::new();
        let report = timeline_report(&store.snapshot().await, None);
        assert_eq!(report.overview.total_duration_weeks, 16);
        assert_eq!(report.phases.len(), 7);
    }

    #[tokio::test]
    async fn custom_start_date_anchors_the_overview() {
        let store = Store::new();
        let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let report = timeline_report(&store.snapshot().await, Some(start));
        assert_eq!(report.overview.estimated_start_date, start);
        assert_eq!(
            report.overview.estimated_end_date,
            NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()
        );
    }

    #[tokio::test]
    async fn phase_weeks_are_contiguous() {
        let snapshot = seeded_snapshot().await;
        let report = timeline_report(&snapshot, None);
        let mut expected_start = 1;
        for phase in &report.phases {
            assert_eq!(phase.start_week, expected_start);
            assert_eq!(phase.end_week, phase.start_week + phase.duration_weeks - 1);
            expected_start = phase.end_week + 1;
        }
        let total: u32 = report.phases.iter().map(|p| p.duration_weeks).sum();
        assert_eq!(total, report.overview.total_duration_weeks);
    }

    #[tokio::test]
    async fn strategy_complexity_tracks_inventory_size() {
        let store = Store::new();
        let low = strategy_report(&store.snapshot().await);
        assert_eq!(low.overview.complexity_level, ComplexityLevel::Low);

        let seeded = seeded_snapshot().await;
        let medium = strategy_report(&seeded);
        // 12 workloads after seeding.
        assert_eq!(medium.overview.complexity_level, ComplexityLevel::Medium);
        let phase_total: u32 = medium.phases.iter().map(|p| p.duration_weeks).sum();
        assert_eq!(phase_total, medium.overview.estimated_duration_weeks);
    }
}
