use crate::classifier::Classifier;
use crate::drivers::{AcquisitionPipeline, AdjustedVector, ByteChannel, GloveError};
use crate::gestures::GestureLabel;
/// Maps adjusted vectors to gesture labels through the injected classifier
/// and reports each label's wire code back to the device.
pub struct ClassificationDispatch<M: Classifier> {
    model: M,
}
impl<M: Classifier> ClassificationDispatch<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
    pub fn classify(&self, vector: &AdjustedVector) -> GestureLabel {
        self.model.predict(&vector.values)
    }
    /// Encodes the label as its single-byte code and writes it out.
    pub fn report<C: ByteChannel>(
        &self,
        pipeline: &mut AcquisitionPipeline<C>,
        label: GestureLabel,
    ) -> Result<(), GloveError> {
        pipeline.send_code(label.code())
    }
    pub fn classify_and_report<C: ByteChannel>(
        &self,
        pipeline: &mut AcquisitionPipeline<C>,
        vector: &AdjustedVector,
    ) -> Result<GestureLabel, GloveError> {
        let label = self.classify(vector);
        self.report(pipeline, label)?;
        Ok(label)
    }
}
