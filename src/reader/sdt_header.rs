// src/reader/sdt_header.rs
use crate::descriptor::{MeasureInfo, MeasurementDescriptor};
use crate::error::Result;
use crate::header::{BlockHeader, FileHeader};
use crate::metadata::{MetaTable, MetadataRecord, MetadataSink};
use crate::raw_data::FieldReader;
use crate::reader::ReadOptions;
use crate::text::{InfoBlock, SetupBlock};
use crate::types::{ByteOrder, Dimensions, FileKind};
use bytes::Bytes;
use std::io::{Cursor, Read, Seek};
use tracing::debug;

/// Everything decoded from the header region of an SDT file
///
/// Built once per file by [`SdtHeader::read`] and not modified afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SdtHeader {
    pub file_header: FileHeader,
    pub info: InfoBlock,
    pub setup: SetupBlock,
    /// Present when the file declares at least one descriptor block
    pub descriptor: Option<MeasurementDescriptor>,
    /// Header of the first data block
    pub block_header: BlockHeader,
    pub dimensions: Dimensions,
}

impl SdtHeader {
    /// Decode the header, writing metadata into `sink` as each stage completes
    ///
    /// The stream must be positioned at the start of the file header. Stages
    /// run in file order: file header, info text, setup text, measurement
    /// descriptor (when declared), first data block header.
    ///
    /// On error the sink keeps whatever earlier stages wrote; treat it as
    /// unusable.
    pub fn read<R, S>(stream: &mut R, byte_order: ByteOrder, sink: &mut S) -> Result<Self>
    where
        R: Read + Seek,
        S: MetadataSink + ?Sized,
    {
        let mut fields = FieldReader::new(stream, byte_order);

        let file_header = FileHeader::read(&mut fields)?;
        file_header.publish(sink);

        let info = InfoBlock::read(
            &mut fields,
            file_header.info_offset(),
            file_header.info_length as usize,
        )?;
        info.publish(sink);

        let setup = SetupBlock::read(
            &mut fields,
            file_header.setup_offset(),
            file_header.setup_length as usize,
        )?;
        setup.publish(sink);

        let mut dimensions = Dimensions {
            width: setup.dimensions.width,
            height: setup.dimensions.height,
            time_bins: setup.dimensions.time_bins,
            channels: setup.dimensions.channels,
            timepoints: 0,
        };

        let descriptor = if file_header.has_meas_desc_block() {
            let descriptor = MeasurementDescriptor::read(
                &mut fields,
                file_header.meas_desc_block_offset(),
                file_header.meas_desc_block_length as usize,
            )?;
            descriptor.publish(sink);
            if let Some(info) = &descriptor.measure_info {
                info.refine_dimensions(&mut dimensions);
            }
            Some(descriptor)
        } else {
            None
        };

        let block_header = BlockHeader::read_at(&mut fields, file_header.data_block_offset())?;
        block_header.publish(sink);

        debug!(
            width = dimensions.width,
            height = dimensions.height,
            time_bins = dimensions.time_bins,
            channels = dimensions.channels,
            timepoints = dimensions.timepoints,
            "Decoded SDT header"
        );

        Ok(SdtHeader {
            file_header,
            info,
            setup,
            descriptor,
            block_header,
            dimensions,
        })
    }

    /// Decode a header held in memory, returning it with its metadata table
    pub fn from_bytes(bytes: impl Into<Bytes>, options: &ReadOptions) -> Result<(Self, MetaTable)> {
        let mut cursor = Cursor::new(bytes.into());
        let mut metadata = MetaTable::new();
        let header = Self::read(&mut cursor, options.byte_order, &mut metadata)?;
        Ok((header, metadata))
    }

    /// Load a whole file asynchronously, then decode its header
    #[cfg(feature = "async")]
    pub async fn read_file_async(
        path: impl AsRef<std::path::Path>,
        options: &ReadOptions,
    ) -> Result<(Self, MetaTable)> {
        let bytes = tokio::fs::read(path).await?;
        Self::from_bytes(bytes, options)
    }

    pub fn width(&self) -> i32 {
        self.dimensions.width
    }

    pub fn height(&self) -> i32 {
        self.dimensions.height
    }

    pub fn time_bins(&self) -> i32 {
        self.dimensions.time_bins
    }

    pub fn channels(&self) -> i32 {
        self.dimensions.channels
    }

    pub fn timepoints(&self) -> i32 {
        self.dimensions.timepoints
    }

    pub fn measure_info(&self) -> Option<&MeasureInfo> {
        self.descriptor.as_ref().and_then(|d| d.measure_info.as_ref())
    }

    pub fn file_kind(&self) -> FileKind {
        self.info.file_kind()
    }
}
