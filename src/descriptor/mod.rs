// src/descriptor/mod.rs
//! Measurement descriptor block
//!
//! The block holds up to five fixed-layout sub-records stored back to back.
//! None of them is flagged individually: a sub-record is present when the
//! declared block length covers it and every sub-record before it.
//!
//! | Sub-record              | Size | Present when length >= |
//! |-------------------------|------|------------------------|
//! | [`MeasureInfo`]         | 211  | 211                    |
//! | [`MeasStopInfo`]        | 60   | 271                    |
//! | [`MeasFcsInfo`]         | 38   | 309                    |
//! | [`ExtendedMeasureInfo`] | 26   | 335                    |
//! | [`MeasHistInfo`]        | 24   | 359                    |

mod extended_info;
mod fcs_info;
mod hist_info;
mod measure_info;
mod stop_info;

pub use extended_info::ExtendedMeasureInfo;
pub use fcs_info::{CalculatedCurve, MeasFcsInfo};
pub use hist_info::MeasHistInfo;
pub use measure_info::MeasureInfo;
pub use stop_info::MeasStopInfo;

use crate::error::Result;
use crate::metadata::{MetadataRecord, MetadataSink};
use crate::raw_data::FieldReader;
use std::io::{Read, Seek};
use tracing::debug;

/// Sub-records of the descriptor block, in file order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SubRecord {
    MeasureInfo,
    MeasStopInfo,
    MeasFcsInfo,
    ExtendedMeasureInfo,
    MeasHistInfo,
}

impl SubRecord {
    pub const ORDER: [SubRecord; 5] = [
        SubRecord::MeasureInfo,
        SubRecord::MeasStopInfo,
        SubRecord::MeasFcsInfo,
        SubRecord::ExtendedMeasureInfo,
        SubRecord::MeasHistInfo,
    ];

    /// Size of this sub-record on disk
    pub fn size(&self) -> usize {
        match self {
            SubRecord::MeasureInfo => MeasureInfo::SIZE,
            SubRecord::MeasStopInfo => MeasStopInfo::SIZE,
            SubRecord::MeasFcsInfo => MeasFcsInfo::SIZE,
            SubRecord::ExtendedMeasureInfo => ExtendedMeasureInfo::SIZE,
            SubRecord::MeasHistInfo => MeasHistInfo::SIZE,
        }
    }

    /// Block length needed for this sub-record and all earlier ones
    pub fn threshold(&self) -> usize {
        Self::ORDER
            .iter()
            .take_while(|r| *r <= self)
            .map(SubRecord::size)
            .sum()
    }

    pub fn is_present(&self, block_length: usize) -> bool {
        block_length >= self.threshold()
    }

    /// Sub-records covered by `block_length`, in read order
    pub fn present_in(block_length: usize) -> impl Iterator<Item = SubRecord> {
        Self::ORDER
            .into_iter()
            .take_while(move |r| r.is_present(block_length))
    }
}

/// Presence flags derived from a descriptor block length
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Presence {
    pub has_measure_info: bool,
    pub has_meas_stop_info: bool,
    pub has_meas_fcs_info: bool,
    pub has_extended_measure_info: bool,
    pub has_meas_hist_info: bool,
}

impl Presence {
    pub fn from_length(block_length: usize) -> Self {
        Presence {
            has_measure_info: SubRecord::MeasureInfo.is_present(block_length),
            has_meas_stop_info: SubRecord::MeasStopInfo.is_present(block_length),
            has_meas_fcs_info: SubRecord::MeasFcsInfo.is_present(block_length),
            has_extended_measure_info: SubRecord::ExtendedMeasureInfo.is_present(block_length),
            has_meas_hist_info: SubRecord::MeasHistInfo.is_present(block_length),
        }
    }
}

/// Decoded measurement descriptor; a later sub-record is only ever set
/// when all earlier ones are
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementDescriptor {
    pub block_length: usize,
    pub measure_info: Option<MeasureInfo>,
    pub stop_info: Option<MeasStopInfo>,
    pub fcs_info: Option<MeasFcsInfo>,
    pub extended_info: Option<ExtendedMeasureInfo>,
    pub hist_info: Option<MeasHistInfo>,
}

impl MeasurementDescriptor {
    /// Seek to `offset` and read every sub-record `block_length` covers
    pub fn read<R: Read + Seek>(
        fields: &mut FieldReader<'_, R>,
        offset: u64,
        block_length: usize,
    ) -> Result<Self> {
        fields.seek(offset)?;

        let mut descriptor = MeasurementDescriptor {
            block_length,
            ..Default::default()
        };
        for record in SubRecord::present_in(block_length) {
            match record {
                SubRecord::MeasureInfo => descriptor.measure_info = Some(MeasureInfo::read(fields)?),
                SubRecord::MeasStopInfo => descriptor.stop_info = Some(MeasStopInfo::read(fields)?),
                SubRecord::MeasFcsInfo => descriptor.fcs_info = Some(MeasFcsInfo::read(fields)?),
                SubRecord::ExtendedMeasureInfo => {
                    descriptor.extended_info = Some(ExtendedMeasureInfo::read(fields)?)
                }
                SubRecord::MeasHistInfo => descriptor.hist_info = Some(MeasHistInfo::read(fields)?),
            }
        }

        debug!(offset, block_length, present = ?descriptor.sub_records(), "Read measurement descriptor");
        Ok(descriptor)
    }

    pub fn presence(&self) -> Presence {
        Presence {
            has_measure_info: self.measure_info.is_some(),
            has_meas_stop_info: self.stop_info.is_some(),
            has_meas_fcs_info: self.fcs_info.is_some(),
            has_extended_measure_info: self.extended_info.is_some(),
            has_meas_hist_info: self.hist_info.is_some(),
        }
    }

    /// Sub-records that were read, in file order
    pub fn sub_records(&self) -> Vec<SubRecord> {
        let presence = self.presence();
        [
            (SubRecord::MeasureInfo, presence.has_measure_info),
            (SubRecord::MeasStopInfo, presence.has_meas_stop_info),
            (SubRecord::MeasFcsInfo, presence.has_meas_fcs_info),
            (SubRecord::ExtendedMeasureInfo, presence.has_extended_measure_info),
            (SubRecord::MeasHistInfo, presence.has_meas_hist_info),
        ]
        .into_iter()
        .filter_map(|(record, present)| present.then_some(record))
        .collect()
    }

    /// Publish every sub-record that was read, in file order
    pub fn publish<S: MetadataSink + ?Sized>(&self, sink: &mut S) {
        if let Some(info) = &self.measure_info {
            info.publish(sink);
        }
        if let Some(info) = &self.stop_info {
            info.publish(sink);
        }
        if let Some(info) = &self.fcs_info {
            info.publish(sink);
        }
        if let Some(info) = &self.extended_info {
            info.publish(sink);
        }
        if let Some(info) = &self.hist_info {
            info.publish(sink);
        }
    }
}
