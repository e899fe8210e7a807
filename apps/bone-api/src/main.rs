use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = bone_api::Args::parse();
	bone_api::run(args).await
}
