pub trait TopicPublisher {
    fn publish(&self, message: &str) -> Result<(), String>;
}
