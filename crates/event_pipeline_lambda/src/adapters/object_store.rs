pub trait ObjectStore {
    fn read_object_text(&self, bucket: &str, key: &str) -> Result<String, String>;
}
