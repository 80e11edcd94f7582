use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProblemCategory {
    DataExploitation,
    TrustCrisis,
    BlockchainScaling,
}

impl ProblemCategory {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "data-exploitation" => Some(Self::DataExploitation),
            "trust-crisis" => Some(Self::TrustCrisis),
            "blockchain-scaling" => Some(Self::BlockchainScaling),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CostLevel {
    Low,
    Medium,
    High,
    #[serde(rename = "Very High")]
    VeryHigh,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveSolution {
    pub category: &'static str,
    pub solution: &'static str,
    pub approach: &'static str,
    pub effectiveness: u8,
    pub cost: CostLevel,
    pub limitations: Vec<&'static str>,
    pub adoption: u8,
}

type Row = (
    &'static str,
    &'static str,
    &'static str,
    u8,
    CostLevel,
    &'static [&'static str],
    u8,
);

const DATA_EXPLOITATION: [Row; 4] = [
    ("Legal", "EU AI Act", "Regulatory compliance", 25, CostLevel::High,
        &["Jurisdictional limits", "Slow enforcement", "Reactive only"], 15),
    ("Technical", "Glaze/Nightshade", "Data poisoning", 35, CostLevel::Medium,
        &["Circumventable", "Damages legitimate use", "Arms race"], 8),
    ("Licensing", "Getty/Shutterstock", "Corporate licensing", 45, CostLevel::VeryHigh,
        &["Excludes individual creators", "Pre-existing relationships only"], 12),
    ("Opt-out", "robots.txt", "Voluntary compliance", 15, CostLevel::Low,
        &["Easily ignored", "No enforcement", "Limited scope"], 35),
];

const TRUST_CRISIS: [Row; 4] = [
    ("Detection", "Reality Defender", "AI detection tools", 73, CostLevel::High,
        &["Declining accuracy", "Arms race", "False positives"], 22),
    ("Watermarking", "SynthID", "Content watermarking", 55, CostLevel::Medium,
        &["Can be stripped", "Not retroactive", "Format dependent"], 18),
    ("Blockchain", "Truepic", "Content verification", 80, CostLevel::VeryHigh,
        &["Expensive per verification", "Limited scalability"], 5),
    ("Legal", "Deepfake laws", "Criminalization", 30, CostLevel::High,
        &["Inconsistent enforcement", "Jurisdictional issues"], 25),
];

const BLOCKCHAIN_SCALING: [Row; 4] = [
    ("Layer 2", "Lightning Network", "Off-chain channels", 60, CostLevel::Medium,
        &["Liquidity requirements", "Channel management", "Centralization"], 15),
    ("Alternative Consensus", "Proof of Stake", "Different consensus", 70, CostLevel::Medium,
        &["Wealth concentration", "Validator centralization"], 40),
    ("Sharding", "Ethereum 2.0", "Parallel processing", 65, CostLevel::High,
        &["Coordination complexity", "Cross-shard communication"], 30),
    ("New Architecture", "Solana", "High-performance blockchain", 75, CostLevel::Medium,
        &["Network outages", "Centralization risks"], 25),
];

pub fn competitive_solutions(category: ProblemCategory) -> Vec<CompetitiveSolution> {
    let rows: &[Row] = match category {
        ProblemCategory::DataExploitation => &DATA_EXPLOITATION,
        ProblemCategory::TrustCrisis => &TRUST_CRISIS,
        ProblemCategory::BlockchainScaling => &BLOCKCHAIN_SCALING,
    };
    rows.iter()
        .map(
            |&(category, solution, approach, effectiveness, cost, limitations, adoption)| {
                CompetitiveSolution {
                    category,
                    solution,
                    approach,
                    effectiveness,
                    cost,
                    limitations: limitations.to_vec(),
                    adoption,
                }
            },
        )
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetric {
    pub aspect: &'static str,
    pub current_solutions: f64,
    pub bsv_solution: f64,
    pub unit: &'static str,
}

pub fn bsv_comparisons() -> Vec<ComparisonMetric> {
    [
        ("Cost per Verification", 0.50, 0.0001, "USD"),
        ("Transaction Throughput", 15.0, 1_000_000.0, "TPS"),
        ("Content Compensation", 0.0, 100.0, "% of value"),
        ("Network Decentralization", 45.0, 95.0, "% distributed"),
        ("Implementation Complexity", 85.0, 20.0, "% effort required"),
    ]
    .into_iter()
    .map(|(aspect, current_solutions, bsv_solution, unit)| ComparisonMetric {
        aspect,
        current_solutions,
        bsv_solution,
        unit,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectivenessPoint {
    pub year: u16,
    pub detection: u8,
    pub legal: u8,
    pub licensing: u8,
}

pub fn effectiveness_trend() -> Vec<EffectivenessPoint> {
    [
        (2020, 95, 60, 70),
        (2021, 88, 55, 65),
        (2022, 82, 50, 60),
        (2023, 76, 40, 55),
        (2024, 73, 30, 45),
    ]
    .into_iter()
    .map(|(year, detection, legal, licensing)| EffectivenessPoint {
        year,
        detection,
        legal,
        licensing,
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdoptionBarrier {
    pub barrier: &'static str,
    pub percentage: u8,
}

pub fn adoption_barriers() -> Vec<AdoptionBarrier> {
    [
        ("High Costs", 45),
        ("Technical Complexity", 35),
        ("Coordination Problems", 30),
        ("Lack of Incentives", 40),
        ("Jurisdictional Issues", 25),
    ]
    .into_iter()
    .map(|(barrier, percentage)| AdoptionBarrier { barrier, percentage })
    .collect()
}

/// Everything the competitive-analysis page shows for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitiveReport {
    pub category: ProblemCategory,
    pub solutions: Vec<CompetitiveSolution>,
    pub bsv_comparisons: Vec<ComparisonMetric>,
    pub effectiveness_trend: Vec<EffectivenessPoint>,
    pub adoption_barriers: Vec<AdoptionBarrier>,
}

pub fn report(category: ProblemCategory) -> CompetitiveReport {
    CompetitiveReport {
        category,
        solutions: competitive_solutions(category),
        bsv_comparisons: bsv_comparisons(),
        effectiveness_trend: effectiveness_trend(),
        adoption_barriers: adoption_barriers(),
    }
}
