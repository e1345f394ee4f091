/// The function that turns a filter window into one output sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reduction {
    /// Arithmetic mean of the window, truncated towards zero.
    Mean,

    /// Middle element of the sorted window.
    Median,
}

impl Reduction {
    /// Reduces the samples of a window to a single sample.
    ///
    /// The window is used as scratch space and may be reordered.
    /// An empty window reduces to zero.
    ///
    /// # Example
    ///
    /// ```
    /// use imsmooth_imgproc::filter::Reduction;
    ///
    /// let mut window = [9, 1, 5, 3, 200, 4, 2, 8, 6];
    /// assert_eq!(Reduction::Median.reduce(&mut window), 5);
    ///
    /// let mut window = [1, 2, 2, 2];
    /// assert_eq!(Reduction::Mean.reduce(&mut window), 1);
    /// ```
    pub fn reduce(&self, window: &mut [u8]) -> u8 {
        if window.is_empty() {
            return 0;
        }

        match self {
            Reduction::Mean => {
                let sum = window.iter().map(|&v| f64::from(v)).sum::<f64>();
                // the cast truncates, it does not round
                (sum / window.len() as f64) as u8
            }
            Reduction::Median => {
                window.sort_unstable();
                window[window.len() / 2]
            }
        }
    }
}
