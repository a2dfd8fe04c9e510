pub use self::bars::GroupedBars;
pub use crate::read::SeriesRow;
pub use self::boxplot::BoxPlot;
pub use self::line::LinePlot;

mod bars;
mod boxplot;
mod line;
