use applier_core::{DashboardViewModel, NoticeKind, RunPhase, StatusTone};
use chrono::Local;

/// Renders the latest view model as timestamped terminal lines.
///
/// Pure function of the view model; called once per dirty update.
pub(crate) fn render(view: &DashboardViewModel) {
    let stamp = Local::now().format("%H:%M:%S");

    match view.phase {
        RunPhase::Idle => {}
        RunPhase::Submitting => {
            println!(
                "[{stamp}] submitting: keywords={} max_applications={} max_pages={} platforms={}",
                view.keywords,
                view.max_applications,
                view.max_pages,
                view.enabled_platforms.join(",")
            );
        }
        RunPhase::Polling | RunPhase::Stopped => {
            if let Some(task) = &view.task {
                println!(
                    "[{stamp}] task {} {} {} ({} applied, update #{})",
                    task.task_id,
                    badge(task.tone),
                    task.state,
                    task.total_applied,
                    view.updates_delivered
                );
                for row in &task.platforms {
                    let detail = row
                        .error
                        .as_deref()
                        .or(row.message.as_deref())
                        .unwrap_or("");
                    match row.applied {
                        Some(applied) => println!(
                            "[{stamp}]   {} {} {} ({} applied) {}",
                            row.platform,
                            badge(row.tone),
                            row.status,
                            applied,
                            detail
                        ),
                        None => println!(
                            "[{stamp}]   {} {} {} {}",
                            row.platform,
                            badge(row.tone),
                            row.status,
                            detail
                        ),
                    }
                }
            }
        }
    }

    if let Some(notice) = &view.notice {
        println!("[{stamp}] {} {}", notice_tag(notice.kind), notice.text);
    }
}

fn badge(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Muted => "[ .. ]",
        StatusTone::Active => "[ >> ]",
        StatusTone::Success => "[ ok ]",
        StatusTone::Danger => "[FAIL]",
    }
}

fn notice_tag(kind: NoticeKind) -> &'static str {
    match kind {
        NoticeKind::Info => "--",
        NoticeKind::Success => "ok",
        NoticeKind::Error => "!!",
    }
}
