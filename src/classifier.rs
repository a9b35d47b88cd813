use anyhow::{bail, Context, Result};
use ndarray::{Array1, Array2, ArrayView1};
use crate::gestures::GestureLabel;
/// Prediction capability injected into the dispatch. Any model that can map
/// one adjusted vector to a label can stand in here; the training algorithm
/// is deliberately not this crate's business.
pub trait Classifier {
    fn predict(&self, values: &[f32]) -> GestureLabel;
}
/// Nearest-centroid model: one mean vector per label, prediction by minimum
/// Euclidean distance. Small, deterministic, and good enough for three
/// well-separated hand shapes; swap in something stronger via [`Classifier`]
/// if the gesture set grows.
pub struct CentroidClassifier {
    centroids: Vec<(GestureLabel, Array1<f32>)>,
}
impl CentroidClassifier {
    /// Fits one centroid per distinct label. All sample vectors must share
    /// one width.
    pub fn fit(samples: &[(Vec<f32>, GestureLabel)]) -> Result<Self> {
        let Some((first, _)) = samples.first() else {
            bail!("cannot fit a classifier on an empty sample set");
        };
        let width = first.len();
        let mut centroids: Vec<(GestureLabel, Array1<f32>, usize)> = Vec::new();
        for (values, label) in samples {
            if values.len() != width {
                bail!(
                    "inconsistent sample width: expected {width}, got {}",
                    values.len()
                );
            }
            let view = ArrayView1::from(values.as_slice());
            match centroids.iter_mut().find(|(known, _, _)| known == label) {
                Some((_, sum, count)) => {
                    *sum += &view;
                    *count += 1;
                }
                None => centroids.push((*label, view.to_owned(), 1)),
            }
        }
        let centroids = centroids
            .into_iter()
            .map(|(label, sum, count)| (label, sum / count as f32))
            .collect();
        Ok(Self { centroids })
    }
    /// Fits from per-label matrices (one row per recorded vector), applying
    /// the same conditioning the live path applies: every row is divided by
    /// its own maximum, and rows whose maximum is not positive are skipped.
    pub fn fit_from_matrices(matrices: &[(GestureLabel, Array2<f32>)]) -> Result<Self> {
        let mut samples = Vec::new();
        let mut skipped = 0usize;
        for (label, matrix) in matrices {
            for row in matrix.rows() {
                let max = row.iter().copied().fold(f32::NEG_INFINITY, f32::max);
                if max <= 0.0 {
                    skipped += 1;
                    continue;
                }
                samples.push((row.iter().map(|v| v / max).collect(), *label));
            }
        }
        if skipped > 0 {
            log::warn!("skipped {skipped} training row(s) with non-positive maxima");
        }
        Self::fit(&samples).context("training matrices produced no usable rows")
    }
    pub fn label_count(&self) -> usize {
        self.centroids.len()
    }
}
impl Classifier for CentroidClassifier {
    fn predict(&self, values: &[f32]) -> GestureLabel {
        let mut best: Option<(GestureLabel, f32)> = None;
        for (label, centroid) in &self.centroids {
            if centroid.len() != values.len() {
                continue;
            }
            let view = ArrayView1::from(values);
            let delta = &view - centroid;
            let distance = delta.dot(&delta);
            if best.map_or(true, |(_, d)| distance < d) {
                best = Some((*label, distance));
            }
        }
        best.map_or(GestureLabel::Unknown, |(label, _)| label)
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    #[test]
    fn predicts_the_label_of_the_nearest_centroid() {
        let samples = vec![
            (vec![1.0, 0.0], GestureLabel::C),
            (vec![0.9, 0.1], GestureLabel::C),
            (vec![0.0, 1.0], GestureLabel::V),
            (vec![0.1, 0.9], GestureLabel::V),
        ];
        let model = CentroidClassifier::fit(&samples).unwrap();
        assert_eq!(model.predict(&[0.8, 0.2]), GestureLabel::C);
        assert_eq!(model.predict(&[0.2, 0.8]), GestureLabel::V);
    }
    #[test]
    fn width_mismatch_predicts_unknown() {
        let samples = vec![(vec![1.0, 0.0], GestureLabel::C)];
        let model = CentroidClassifier::fit(&samples).unwrap();
        assert_eq!(model.predict(&[1.0, 0.0, 0.0]), GestureLabel::Unknown);
    }
    #[test]
    fn fitting_an_empty_sample_set_fails() {
        assert!(CentroidClassifier::fit(&[]).is_err());
    }
    #[test]
    fn fit_from_matrices_normalizes_rows_and_skips_dead_ones() {
        let matrix = array![[2.0, 4.0], [0.0, 0.0], [1.0, 1.0]];
        let model =
            CentroidClassifier::fit_from_matrices(&[(GestureLabel::T, matrix)]).unwrap();
        assert_eq!(model.label_count(), 1);
        // Rows [2,4] and [1,1] normalize to [0.5,1] and [1,1]; the all-zero
        // row is dropped, so the centroid sits at their midpoint.
        assert_eq!(model.predict(&[0.75, 1.0]), GestureLabel::T);
    }
}
