// src/descriptor/fcs_info.rs
use crate::error::Result;
use crate::metadata::MetadataRecord;
use crate::raw_data::FieldReader;
use crate::types::MetaValue;
use std::io::{Read, Seek};

/// Curves computed after a FIFO measurement, as flagged in `fcs_decay_calc`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatedCurve {
    Decay,
    Fcs,
    Fida,
    Filda,
    Mcs,
    Image3d,
}

impl CalculatedCurve {
    pub const ALL: [CalculatedCurve; 6] = [
        CalculatedCurve::Decay,
        CalculatedCurve::Fcs,
        CalculatedCurve::Fida,
        CalculatedCurve::Filda,
        CalculatedCurve::Mcs,
        CalculatedCurve::Image3d,
    ];

    pub fn bit(&self) -> u16 {
        1 << (*self as u16)
    }
}

/// Information collected when a FIFO measurement finished
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasFcsInfo {
    /// Routing channel number
    pub chan: u16,
    /// Bit mask of [`CalculatedCurve`]s
    pub fcs_decay_calc: u16,
    /// Macro time clock in 0.1 ns units
    pub mt_resol: i64,
    /// Correlation time in ms
    pub cortime: f32,
    pub calc_photons: i64,
    pub fcs_points: i32,
    /// Macro time of the last photon
    pub end_time: f32,
    /// FIFO overruns; when > 0 the FCS curve and `end_time` are not valid
    pub overruns: u16,
    /// 0 for linear FCS with log binning; bit 15 set for multi-tau
    pub fcs_type: u16,
    pub cross_chan: u16,
    pub module: u16,
    pub cross_mod: u16,
    /// Macro time clock of the cross FCS module in 0.1 ns units
    pub cross_mt_resol: i64,
}

impl MeasFcsInfo {
    pub const SIZE: usize = 38;
    pub const MULTI_TAU: u16 = 1 << 15;

    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>) -> Result<Self> {
        Ok(MeasFcsInfo {
            chan: fields.read_u16()?,
            fcs_decay_calc: fields.read_u16()?,
            mt_resol: fields.read_u32_widened()?,
            cortime: fields.read_f32()?,
            calc_photons: fields.read_u32_widened()?,
            fcs_points: fields.read_i32()?,
            end_time: fields.read_f32()?,
            overruns: fields.read_u16()?,
            fcs_type: fields.read_u16()?,
            cross_chan: fields.read_u16()?,
            module: fields.read_u16()?,
            cross_mod: fields.read_u16()?,
            cross_mt_resol: fields.read_u32_widened()?,
        })
    }

    pub fn has_curve(&self, curve: CalculatedCurve) -> bool {
        self.fcs_decay_calc & curve.bit() != 0
    }

    pub fn curves(&self) -> Vec<CalculatedCurve> {
        CalculatedCurve::ALL
            .into_iter()
            .filter(|c| self.has_curve(*c))
            .collect()
    }

    /// The `ktau` parameter of a multi-tau FCS curve
    pub fn multi_tau_ktau(&self) -> Option<u16> {
        if self.fcs_type & Self::MULTI_TAU != 0 {
            Some(self.fcs_type & !Self::MULTI_TAU)
        } else {
            None
        }
    }

    /// Auto-correlation when routing channel and module match the cross ones
    pub fn is_auto_correlation(&self) -> bool {
        self.chan == self.cross_chan && self.module == self.cross_mod
    }
}

impl MetadataRecord for MeasFcsInfo {
    const NAMESPACE: &'static str = "MeasFCSInfo";

    fn fields(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            ("chan", self.chan.into()),
            ("fcsDecayCalc", self.fcs_decay_calc.into()),
            ("mtResol", self.mt_resol.into()),
            ("cortime", self.cortime.into()),
            ("calcPhotons", self.calc_photons.into()),
            ("fcsPoints", self.fcs_points.into()),
            ("endTime", self.end_time.into()),
            ("overruns", self.overruns.into()),
            ("fcsType", self.fcs_type.into()),
            ("crossChan", self.cross_chan.into()),
            ("mod", self.module.into()),
            ("crossMod", self.cross_mod.into()),
            ("crossMtResol", self.cross_mt_resol.into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::fixtures::fcs_info_bytes;
    use crate::types::ByteOrder;
    use std::io::Cursor;

    #[test]
    fn test_read_fcs_info_with_large_counters() {
        let mut cursor = Cursor::new(fcs_info_bytes(0xffff_ff00));
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        let info = MeasFcsInfo::read(&mut fields).unwrap();

        assert_eq!(fields.position().unwrap(), MeasFcsInfo::SIZE as u64);
        assert_eq!(info.calc_photons, 0xffff_ff00);
        assert!(info.calc_photons > 0);
        assert_eq!(info.mt_resol, 250);
        assert_eq!(info.cross_mt_resol, 0x8000_0000);
    }

    #[test]
    fn test_curve_flags_and_fcs_type() {
        let mut cursor = Cursor::new(fcs_info_bytes(1));
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        let info = MeasFcsInfo::read(&mut fields).unwrap();

        assert_eq!(info.curves(), vec![CalculatedCurve::Decay, CalculatedCurve::Fcs, CalculatedCurve::Image3d]);
        assert_eq!(info.multi_tau_ktau(), Some(8));
        assert!(info.is_auto_correlation());
    }

    #[test]
    fn test_cross_resolution_published_as_long() {
        let mut cursor = Cursor::new(fcs_info_bytes(1));
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        let info = MeasFcsInfo::read(&mut fields).unwrap();
        assert!(info.fields().contains(&("crossMtResol", MetaValue::Long(0x8000_0000))));
    }
}
