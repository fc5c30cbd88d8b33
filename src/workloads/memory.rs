//! Allocation churn
//!
//! Allocates randomly sized blocks and touches one byte per KiB so the pages
//! are actually faulted in. Blocks are kept alive in FIFO order and the oldest
//! ones are released once the live total would pass `max_live_bytes`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::hint::black_box;
use std::ops::RangeInclusive;

const KIB: usize = 1024;

/// Counters for one stress run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStressReport {
    /// Number of blocks allocated
    pub blocks: usize,
    /// Bytes allocated across all blocks
    pub total_bytes: u64,
    /// Largest number of bytes held at once
    pub peak_live_bytes: u64,
    /// Blocks released early to stay under the live budget
    pub evicted: usize,
    /// Wrapping sum of the touched bytes
    pub checksum: u64,
}

/// Run `iterations` allocations with sizes drawn from `block_kb` (in KiB)
pub fn stress<R: Rng + ?Sized>(
    iterations: usize,
    block_kb: RangeInclusive<usize>,
    max_live_bytes: u64,
    rng: &mut R,
) -> MemoryStressReport {
    let mut report = MemoryStressReport::default();
    let mut live: VecDeque<Vec<u8>> = VecDeque::new();
    let mut live_bytes: u64 = 0;

    for _ in 0..iterations {
        let size = rng.gen_range(block_kb.clone()) * KIB;

        while !live.is_empty() && live_bytes + size as u64 > max_live_bytes {
            if let Some(old) = live.pop_front() {
                live_bytes -= old.len() as u64;
                report.evicted += 1;
            }
        }

        let block = fill_block(size, &mut report.checksum);
        live_bytes += block.len() as u64;
        live.push_back(black_box(block));

        report.blocks += 1;
        report.total_bytes += size as u64;
        report.peak_live_bytes = report.peak_live_bytes.max(live_bytes);
    }

    report
}

fn fill_block(size: usize, checksum: &mut u64) -> Vec<u8> {
    let mut block = vec![0u8; size];
    for j in (0..size).step_by(KIB) {
        let seed = (j % 256) as u32;
        let value = ((seed * 17 + 31) % 256) as u8;
        block[j] = value;
        *checksum = checksum.wrapping_add(u64::from(value));
    }
    block
}
