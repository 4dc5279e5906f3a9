// src/descriptor/hist_info.rs
use crate::error::Result;
use crate::metadata::MetadataRecord;
use crate::raw_data::FieldReader;
use crate::types::MetaValue;
use std::io::{Read, Seek};

/// FIDA, FILDA and MCS histogram parameters of a FIFO measurement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasHistInfo {
    /// Interval time in ms for the FIDA histogram
    pub fida_time: f32,
    /// Interval time in ms for the FILDA histogram
    pub filda_time: f32,
    pub fida_points: i32,
    pub filda_points: i32,
    /// Interval time in ms for the MCS histogram
    pub mcs_time: f32,
    pub mcs_points: i32,
}

impl MeasHistInfo {
    pub const SIZE: usize = 24;

    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>) -> Result<Self> {
        Ok(MeasHistInfo {
            fida_time: fields.read_f32()?,
            filda_time: fields.read_f32()?,
            fida_points: fields.read_i32()?,
            filda_points: fields.read_i32()?,
            mcs_time: fields.read_f32()?,
            mcs_points: fields.read_i32()?,
        })
    }
}

impl MetadataRecord for MeasHistInfo {
    const NAMESPACE: &'static str = "MeasHISTInfo";

    fn fields(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            ("fidaTime", self.fida_time.into()),
            ("fildaTime", self.filda_time.into()),
            ("fidaPoints", self.fida_points.into()),
            ("fildaPoints", self.filda_points.into()),
            ("mcsTime", self.mcs_time.into()),
            ("mcsPoints", self.mcs_points.into()),
        ]
    }
}
