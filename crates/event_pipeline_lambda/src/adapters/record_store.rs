use event_pipeline_core::contract::UserRecord;

pub trait RecordStore {
    fn put_user_record(&self, record: &UserRecord) -> Result<(), String>;
}
