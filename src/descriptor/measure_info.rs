// src/descriptor/measure_info.rs
use crate::error::Result;
use crate::metadata::MetadataRecord;
use crate::raw_data::FieldReader;
use crate::types::{Dimensions, MetaValue};
use std::io::{Read, Seek};

/// Measurement parameters recorded when the measurement was set up
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasureInfo {
    /// Time of creation
    pub time: String,
    /// Date of creation
    pub date: String,
    /// Serial number of the module
    pub mod_ser_no: String,
    pub meas_mode: i16,
    pub cfd_ll: f32,
    pub cfd_lh: f32,
    pub cfd_zc: f32,
    pub cfd_hf: f32,
    pub syn_zc: f32,
    pub syn_fd: i16,
    pub syn_hf: f32,
    pub tac_r: f32,
    pub tac_g: i16,
    pub tac_of: f32,
    pub tac_ll: f32,
    pub tac_lh: f32,
    /// ADC resolution, i.e. time bins per curve
    pub adc_re: i16,
    pub eal_de: i16,
    pub ncx: i16,
    pub ncy: i16,
    pub page: u16,
    pub col_t: f32,
    pub rep_t: f32,
    pub stopt: i16,
    pub overfl: u8,
    pub use_motor: i16,
    pub steps: u16,
    pub offset: f32,
    pub dither: i16,
    pub incr: i16,
    pub mem_bank: i16,
    /// Module type
    pub mod_type: String,
    pub syn_th: f32,
    pub dead_time_comp: i16,
    /// 2 = disabled line markers
    pub polarity_l: i16,
    pub polarity_f: i16,
    pub polarity_p: i16,
    /// Line predivider = 2 ** linediv
    pub linediv: i16,
    pub accumulate: i16,
    pub flbck_y: i32,
    pub flbck_x: i32,
    pub bord_u: i32,
    pub bord_l: i32,
    pub pix_time: f32,
    pub pix_clk: i16,
    pub trigger: i16,
    pub scan_x: i32,
    pub scan_y: i32,
    pub scan_rx: i32,
    pub scan_ry: i32,
    pub fifo_typ: i16,
    pub epx_div: i32,
    pub mod_type_code: u16,
    pub mod_fpga_ver: u16,
    pub overflow_corr_factor: f32,
    pub adc_zoom: i32,
    /// Accumulation cycles in FLOW mode
    pub cycles: i32,
}

impl MeasureInfo {
    pub const SIZE: usize = 211;

    pub fn read<R: Read + Seek>(fields: &mut FieldReader<'_, R>) -> Result<Self> {
        Ok(MeasureInfo {
            time: fields.read_string(9)?,
            date: fields.read_string(11)?,
            mod_ser_no: fields.read_string(16)?,
            meas_mode: fields.read_i16()?,
            cfd_ll: fields.read_f32()?,
            cfd_lh: fields.read_f32()?,
            cfd_zc: fields.read_f32()?,
            cfd_hf: fields.read_f32()?,
            syn_zc: fields.read_f32()?,
            syn_fd: fields.read_i16()?,
            syn_hf: fields.read_f32()?,
            tac_r: fields.read_f32()?,
            tac_g: fields.read_i16()?,
            tac_of: fields.read_f32()?,
            tac_ll: fields.read_f32()?,
            tac_lh: fields.read_f32()?,
            adc_re: fields.read_i16()?,
            eal_de: fields.read_i16()?,
            ncx: fields.read_i16()?,
            ncy: fields.read_i16()?,
            page: fields.read_u16()?,
            col_t: fields.read_f32()?,
            rep_t: fields.read_f32()?,
            stopt: fields.read_i16()?,
            overfl: fields.read_u8()?,
            use_motor: fields.read_i16()?,
            steps: fields.read_u16()?,
            offset: fields.read_f32()?,
            dither: fields.read_i16()?,
            incr: fields.read_i16()?,
            mem_bank: fields.read_i16()?,
            mod_type: fields.read_string(16)?,
            syn_th: fields.read_f32()?,
            dead_time_comp: fields.read_i16()?,
            polarity_l: fields.read_i16()?,
            polarity_f: fields.read_i16()?,
            polarity_p: fields.read_i16()?,
            linediv: fields.read_i16()?,
            accumulate: fields.read_i16()?,
            flbck_y: fields.read_i32()?,
            flbck_x: fields.read_i32()?,
            bord_u: fields.read_i32()?,
            bord_l: fields.read_i32()?,
            pix_time: fields.read_f32()?,
            pix_clk: fields.read_i16()?,
            trigger: fields.read_i16()?,
            scan_x: fields.read_i32()?,
            scan_y: fields.read_i32()?,
            scan_rx: fields.read_i32()?,
            scan_ry: fields.read_i32()?,
            fifo_typ: fields.read_i16()?,
            epx_div: fields.read_i32()?,
            mod_type_code: fields.read_u16()?,
            mod_fpga_ver: fields.read_u16()?,
            overflow_corr_factor: fields.read_f32()?,
            adc_zoom: fields.read_i32()?,
            cycles: fields.read_i32()?,
        })
    }

    /// Apply this record's geometry on top of setup-derived dimensions
    ///
    /// `timepoints` always comes from `stopt`. Width, height, time bins and
    /// channels are replaced only by positive values here.
    pub fn refine_dimensions(&self, dims: &mut Dimensions) {
        dims.timepoints = self.stopt as i32;
        if self.scan_x > 0 {
            dims.width = self.scan_x;
        }
        if self.scan_y > 0 {
            dims.height = self.scan_y;
        }
        if self.adc_re > 0 {
            dims.time_bins = self.adc_re as i32;
        }
        if self.scan_rx > 0 {
            dims.channels = self.scan_rx;
        }
    }
}

impl MetadataRecord for MeasureInfo {
    const NAMESPACE: &'static str = "MeasureInfo";

    fn fields(&self) -> Vec<(&'static str, MetaValue)> {
        vec![
            ("time", self.time.as_str().into()),
            ("date", self.date.as_str().into()),
            ("modSerNo", self.mod_ser_no.as_str().into()),
            ("measMode", self.meas_mode.into()),
            ("cfdLL", self.cfd_ll.into()),
            ("cfdLH", self.cfd_lh.into()),
            ("cfdZC", self.cfd_zc.into()),
            ("cfdHF", self.cfd_hf.into()),
            ("synZC", self.syn_zc.into()),
            ("synFD", self.syn_fd.into()),
            ("synHF", self.syn_hf.into()),
            ("tacR", self.tac_r.into()),
            ("tacG", self.tac_g.into()),
            ("tacOF", self.tac_of.into()),
            ("tacLL", self.tac_ll.into()),
            ("tacLH", self.tac_lh.into()),
            ("adcRE", self.adc_re.into()),
            ("ealDE", self.eal_de.into()),
            ("ncx", self.ncx.into()),
            ("ncy", self.ncy.into()),
            ("page", self.page.into()),
            ("colT", self.col_t.into()),
            ("repT", self.rep_t.into()),
            ("stopt", self.stopt.into()),
            ("overfl", self.overfl.into()),
            ("useMotor", self.use_motor.into()),
            ("steps", self.steps.into()),
            ("offset", self.offset.into()),
            ("dither", self.dither.into()),
            ("incr", self.incr.into()),
            ("memBank", self.mem_bank.into()),
            ("modType", self.mod_type.as_str().into()),
            ("synTH", self.syn_th.into()),
            ("deadTimeComp", self.dead_time_comp.into()),
            ("polarityL", self.polarity_l.into()),
            ("polarityF", self.polarity_f.into()),
            ("polarityP", self.polarity_p.into()),
            ("linediv", self.linediv.into()),
            ("accumulate", self.accumulate.into()),
            ("flbckY", self.flbck_y.into()),
            ("flbckX", self.flbck_x.into()),
            ("bordU", self.bord_u.into()),
            ("bordL", self.bord_l.into()),
            ("pixTime", self.pix_time.into()),
            ("pixClk", self.pix_clk.into()),
            ("trigger", self.trigger.into()),
            ("scanX", self.scan_x.into()),
            ("scanY", self.scan_y.into()),
            ("scanRX", self.scan_rx.into()),
            ("scanRY", self.scan_ry.into()),
            ("fifoTyp", self.fifo_typ.into()),
            ("epxDiv", self.epx_div.into()),
            ("modTypeCode", self.mod_type_code.into()),
            ("modFpgaVer", self.mod_fpga_ver.into()),
            ("overflowCorrFactor", self.overflow_corr_factor.into()),
            ("adcZoom", self.adc_zoom.into()),
            ("cycles", self.cycles.into()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::fixtures::{measure_info_bytes, MeasureInfoFixture};
    use crate::types::ByteOrder;
    use std::io::Cursor;

    fn read(fixture: &MeasureInfoFixture) -> MeasureInfo {
        let mut cursor = Cursor::new(measure_info_bytes(fixture));
        let mut fields = FieldReader::new(&mut cursor, ByteOrder::Little);
        let info = MeasureInfo::read(&mut fields).unwrap();
        assert_eq!(fields.position().unwrap(), MeasureInfo::SIZE as u64);
        info
    }

    #[test]
    fn test_read_strings_and_geometry() {
        let info = read(&MeasureInfoFixture {
            scan: [256, 128, 4, 1],
            adc_re: 1024,
            stopt: 3,
            ..Default::default()
        });

        assert_eq!(info.time, "10:20:30");
        assert_eq!(info.date, "2013-05-01");
        assert_eq!(info.mod_ser_no, "SN12345");
        assert_eq!(info.mod_type, "SPC-150");
        assert_eq!(info.scan_x, 256);
        assert_eq!(info.scan_ry, 1);
        assert_eq!(info.adc_re, 1024);
        assert_eq!(info.cycles, 7);
    }

    #[test]
    fn test_refine_dimensions_positive_values_override() {
        let info = read(&MeasureInfoFixture {
            scan: [256, 128, 4, 9],
            adc_re: 64,
            stopt: 2,
            ..Default::default()
        });
        let mut dims = Dimensions { width: 1, height: 1, time_bins: 1, channels: 5, timepoints: 0 };
        info.refine_dimensions(&mut dims);

        assert_eq!(dims, Dimensions { width: 256, height: 128, time_bins: 64, channels: 4, timepoints: 2 });
    }

    #[test]
    fn test_refine_dimensions_keeps_setup_values_for_non_positive() {
        let info = read(&MeasureInfoFixture {
            scan: [0, -1, 0, 0],
            adc_re: 0,
            stopt: 0,
            ..Default::default()
        });
        let mut dims = Dimensions { width: 512, height: 256, time_bins: 64, channels: 5, timepoints: 9 };
        info.refine_dimensions(&mut dims);

        assert_eq!(dims, Dimensions { width: 512, height: 256, time_bins: 64, channels: 5, timepoints: 0 });
    }

    #[test]
    fn test_publishes_every_field() {
        let info = read(&MeasureInfoFixture::default());
        let fields = info.fields();
        assert_eq!(fields.len(), 57);
        assert!(fields.contains(&("modType", MetaValue::from("SPC-150"))));
        assert!(fields.contains(&("overfl", MetaValue::Int(1))));
    }
}
