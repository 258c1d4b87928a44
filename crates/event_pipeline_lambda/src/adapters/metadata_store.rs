use event_pipeline_core::contract::UploadMetadataRecord;

pub trait MetadataStore {
    fn put_metadata_record(&self, record: &UploadMetadataRecord) -> Result<(), String>;
}
