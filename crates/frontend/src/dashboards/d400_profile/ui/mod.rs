mod dashboard;

pub use dashboard::ProfileDashboard;
