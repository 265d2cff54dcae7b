use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use service::{
    day_summary::AbsenceClass,
    statistics::{DayDetail, MonthlyStatistics, StatisticsService},
    ServiceError,
};
use tally_utils::{format_clock_time, format_iso_date, iter_dates, month_bounds};
use uuid::Uuid;

pub struct StatisticsServiceImpl<
    DaySummaryService: service::day_summary::DaySummaryService,
    HolidayCalendarService: service::holiday_calendar::HolidayCalendarService,
> {
    day_summary_service: Arc<DaySummaryService>,
    holiday_calendar_service: Arc<HolidayCalendarService>,
}

impl<DaySummaryService, HolidayCalendarService>
    StatisticsServiceImpl<DaySummaryService, HolidayCalendarService>
where
    DaySummaryService: service::day_summary::DaySummaryService + Sync + Send,
    HolidayCalendarService: service::holiday_calendar::HolidayCalendarService + Sync + Send,
{
    pub fn new(
        day_summary_service: Arc<DaySummaryService>,
        holiday_calendar_service: Arc<HolidayCalendarService>,
    ) -> Self {
        Self {
            day_summary_service,
            holiday_calendar_service,
        }
    }
}

#[async_trait]
impl<
        DaySummaryService: service::day_summary::DaySummaryService + Sync + Send,
        HolidayCalendarService: service::holiday_calendar::HolidayCalendarService + Sync + Send,
    > StatisticsService for StatisticsServiceImpl<DaySummaryService, HolidayCalendarService>
{
    async fn monthly_statistics(
        &self,
        user_id: Uuid,
        year: i32,
        month: u8,
    ) -> Result<MonthlyStatistics, ServiceError> {
        let (first_day, last_day) = month_bounds(year, month)?;
        let summaries = self
            .day_summary_service
            .find_by_user_in_range(user_id, first_day, last_day)
            .await?;

        let mut working_days = 0u32;
        for date in iter_dates(first_day, last_day) {
            if self.holiday_calendar_service.is_workday(date).await? {
                working_days += 1;
            }
        }

        let mut statistics = MonthlyStatistics {
            user_id,
            year,
            month,
            normal_days: 0,
            late_days: 0,
            early_leave_days: 0,
            absence_days: 0,
            leave_days: 0,
            outside_work_days: 0,
            working_days,
            attendance_days: 0,
            attendance_rate: 0.0,
            total_worked_minutes: 0,
            average_worked_minutes: 0,
            overtime_minutes: 0,
            days: BTreeMap::new(),
        };

        let mut days_with_work = 0u32;
        for summary in summaries.iter() {
            match summary.absence {
                AbsenceClass::Normal => statistics.normal_days += 1,
                AbsenceClass::Late => statistics.late_days += 1,
                AbsenceClass::EarlyLeave => statistics.early_leave_days += 1,
                AbsenceClass::Absence => statistics.absence_days += 1,
                AbsenceClass::Leave => statistics.leave_days += 1,
                AbsenceClass::OutsideWork => statistics.outside_work_days += 1,
            }
            statistics.total_worked_minutes += summary.worked_minutes;
            statistics.overtime_minutes += summary.overtime_minutes;
            if summary.worked_minutes > 0 {
                days_with_work += 1;
            }
            statistics.days.insert(
                format_iso_date(summary.date),
                DayDetail {
                    absence: summary.absence,
                    clock_in: summary.clock_in_time.map(format_clock_time),
                    clock_out: summary.clock_out_time.map(format_clock_time),
                    worked_minutes: summary.worked_minutes,
                    overtime_minutes: summary.overtime_minutes,
                    anomaly: summary.anomaly,
                },
            );
        }

        statistics.attendance_days = statistics.normal_days
            + statistics.late_days
            + statistics.early_leave_days
            + statistics.outside_work_days;
        if working_days > 0 {
            let rate =
                f64::from(statistics.attendance_days) / f64::from(working_days) * 100.0;
            statistics.attendance_rate = (rate * 100.0).round() / 100.0;
        }
        if days_with_work > 0 {
            statistics.average_worked_minutes = statistics.total_worked_minutes / days_with_work;
        }

        Ok(statistics)
    }
}
