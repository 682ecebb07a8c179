use crate::di::Services;

pub async fn expunge(services: &Services) -> anyhow::Result<()> {
    let removed = services.expunge.execute().await?;
    println!("{} expired records removed", removed);
    Ok(())
}
