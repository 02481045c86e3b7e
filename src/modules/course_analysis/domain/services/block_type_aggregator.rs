use super::super::entities::{BlockTypeCounts, STRUCTURAL_BLOCK_TYPES};
use serde::Serialize;

/// Derived numbers for one course, computed from its block type counts
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockSummary {
    /// Sum of every count, supported or not
    pub all_blocks: u64,
    pub total_blocks: u64,
    pub total_components: u64,
    pub total_unsupported_blocks: u64,
    pub sections: u64,
    pub subsections: u64,
    pub units: u64,
    pub unsupported_percentage: f64,
}

impl BlockSummary {
    /// `"supported/total"` when something is unsupported, otherwise the total
    pub fn blocks_display(&self) -> String {
        ratio_display(self.total_blocks, self.total_unsupported_blocks)
    }

    pub fn components_display(&self) -> String {
        ratio_display(self.total_components, self.total_unsupported_blocks)
    }

    pub fn percentage_display(&self) -> String {
        format!("{:.2}", self.unsupported_percentage)
    }

    pub fn has_unsupported(&self) -> bool {
        self.total_unsupported_blocks > 0
    }
}

fn ratio_display(supported: u64, unsupported: u64) -> String {
    if unsupported > 0 {
        format!("{}/{}", supported, supported + unsupported)
    } else {
        supported.to_string()
    }
}

/// Splits a course's blocks into what a library can and cannot hold
#[derive(Debug, Clone)]
pub struct BlockTypeAggregator {
    unsupported_types: Vec<String>,
}

impl BlockTypeAggregator {
    pub fn new(unsupported_types: Vec<String>) -> Self {
        Self { unsupported_types }
    }

    pub fn unsupported_types(&self) -> &[String] {
        &self.unsupported_types
    }

    pub fn is_unsupported(&self, block_type: &str) -> bool {
        self.unsupported_types.iter().any(|t| t == block_type)
    }

    /// Summarise counts that may still be loading
    ///
    /// `None` means "not known yet" and never collapses to zero.
    pub fn summarize(
        &self,
        counts: Option<&BlockTypeCounts>,
        unsupported_children: Option<&BlockTypeCounts>,
    ) -> Option<BlockSummary> {
        counts.map(|counts| self.aggregate(counts, unsupported_children))
    }

    /// `unsupported_children` are blocks nested under an unsupported block;
    /// they are already part of `counts` and cannot be imported either.
    pub fn aggregate(
        &self,
        counts: &BlockTypeCounts,
        unsupported_children: Option<&BlockTypeCounts>,
    ) -> BlockSummary {
        let all_blocks = counts.total();
        let unsupported_own: u64 = self
            .unsupported_types
            .iter()
            .map(|t| counts.get(t))
            .sum();
        let total_unsupported_blocks = (unsupported_own
            + unsupported_children.map(BlockTypeCounts::total).unwrap_or(0))
        .min(all_blocks);

        let non_structural: u64 = counts
            .0
            .iter()
            .filter(|(block_type, _)| !STRUCTURAL_BLOCK_TYPES.contains(&block_type.as_str()))
            .map(|(_, count)| count)
            .sum();

        let unsupported_percentage = if all_blocks == 0 {
            0.0
        } else {
            total_unsupported_blocks as f64 / all_blocks as f64 * 100.0
        };

        BlockSummary {
            all_blocks,
            total_blocks: all_blocks - total_unsupported_blocks,
            total_components: non_structural.saturating_sub(total_unsupported_blocks),
            total_unsupported_blocks,
            sections: counts.get("chapter"),
            subsections: counts.get("sequential"),
            units: counts.get("vertical"),
            unsupported_percentage,
        }
    }
}
