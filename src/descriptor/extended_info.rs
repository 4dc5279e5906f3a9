// src/descriptor/extended_info.rs
use crate::error::Result;
use crate::metadata::MetadataRecord;
use crate::raw_data::FieldReader;
use crate::types::MetaValue;
use std::io::{Read, Seek};

/// Camera / FIFO_IMAGE mode extension of [`MeasureInfo`](super::MeasureInfo)
///
/// Published under the `MeasureInfo` namespace it extends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtendedMeasureInfo {
    pub image_x: i32,
    pub image_y: i32,
    pub image_rx: i32,
    pub image_ry: i32,
    /// Gain for XY ADCs (SPC-930)
    pub xy_gain: i16,
    /// Use of the master clock (SPC-140 multi-module)
    pub master_clock: i16,
    /// ADC sample delay (SPC-930)
    pub adc_de: i16,
    /// Detector type (SPC-930 in camera mode)
    pub det_type: i16,
    /// X axis representation (SPC-930)
    pub x_axis: i16,
}

impl ExtendedMeasureInfo {
    pub const SIZE: usize = 26;

    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>) -> Result<Self> {
        Ok(ExtendedMeasureInfo {
            image_x: fields.read_i32()?,
            image_y: fields.read_i32()?,
            image_rx: fields.read_i32()?,
            image_ry: fields.read_i32()?,
            xy_gain: fields.read_i16()?,
            master_clock: fields.read_i16()?,
            adc_de: fields.read_i16()?,
            det_type: fields.read_i16()?,
            x_axis: fields.read_i16()?,
        })
    }
}

impl MetadataRecord for ExtendedMeasureInfo {
    const NAMESPACE: &'static str = "MeasureInfo";

    fn fields(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            ("imageX", self.image_x.into()),
            ("imageY", self.image_y.into()),
            ("imageRX", self.image_rx.into()),
            ("imageRY", self.image_ry.into()),
            ("xyGain", self.xy_gain.into()),
            ("masterClock", self.master_clock.into()),
            ("adcDE", self.adc_de.into()),
            ("detType", self.det_type.into()),
            ("xAxis", self.x_axis.into()),
        ]
    }
}
