// src/descriptor/stop_info.rs
use crate::error::Result;
use crate::metadata::MetadataRecord;
use crate::raw_data::FieldReader;
use crate::types::MetaValue;
use std::io::{Read, Seek};

/// Information collected when the measurement finished
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasStopInfo {
    /// Last `SPC_test_state` return value
    pub status: u16,
    /// Scan clocks in bits 2-0 (frame, line, pixel), rates read in bit 15
    pub flags: u16,
    /// Time from start to disarm, or to the end of the cycle
    pub stop_time: f32,
    pub cur_step: i32,
    pub cur_cycle: i32,
    pub cur_page: i32,
    pub min_sync_rate: f32,
    /// -1.0 when not set
    pub min_cfd_rate: f32,
    pub min_tac_rate: f32,
    pub min_adc_rate: f32,
    pub max_sync_rate: f32,
    /// -1.0 when not set
    pub max_cfd_rate: f32,
    pub max_tac_rate: f32,
    pub max_adc_rate: f32,
    pub reserved1: i32,
    pub reserved2: f32,
}

impl MeasStopInfo {
    pub const SIZE: usize = 60;
    pub const RATES_READ: u16 = 1 << 15;

    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>) -> Result<Self> {
        Ok(MeasStopInfo {
            status: fields.read_u16()?,
            flags: fields.read_u16()?,
            stop_time: fields.read_f32()?,
            cur_step: fields.read_i32()?,
            cur_cycle: fields.read_i32()?,
            cur_page: fields.read_i32()?,
            min_sync_rate: fields.read_f32()?,
            min_cfd_rate: fields.read_f32()?,
            min_tac_rate: fields.read_f32()?,
            min_adc_rate: fields.read_f32()?,
            max_sync_rate: fields.read_f32()?,
            max_cfd_rate: fields.read_f32()?,
            max_tac_rate: fields.read_f32()?,
            max_adc_rate: fields.read_f32()?,
            reserved1: fields.read_i32()?,
            reserved2: fields.read_f32()?,
        })
    }

    /// Whether the min/max rate fields were filled in
    pub fn rates_read(&self) -> bool {
        self.flags & Self::RATES_READ != 0
    }

    /// Frame, line and pixel clock bits
    pub fn scan_clocks(&self) -> u16 {
        self.flags & 0b111
    }
}

impl MetadataRecord for MeasStopInfo {
    const NAMESPACE: &'static str = "MeasStopInfo";

    fn fields(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            ("status", self.status.into()),
            ("flags", self.flags.into()),
            ("stopTime", self.stop_time.into()),
            ("curStep", self.cur_step.into()),
            ("curCycle", self.cur_cycle.into()),
            ("curPage", self.cur_page.into()),
            ("minSyncRate", self.min_sync_rate.into()),
            ("minCfdRate", self.min_cfd_rate.into()),
            ("minTacRate", self.min_tac_rate.into()),
            ("minAdcRate", self.min_adc_rate.into()),
            ("maxSyncRate", self.max_sync_rate.into()),
            ("maxCfdRate", self.max_cfd_rate.into()),
            ("maxTacRate", self.max_tac_rate.into()),
            ("maxAdcRate", self.max_adc_rate.into()),
            ("reserved1", self.reserved1.into()),
            ("reserved2", self.reserved2.into()),
        ]
    }
}
