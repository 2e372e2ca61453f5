use crate::TryOnArgs;
use anyhow::{Context, Result, bail};
use fitlab_application::{FeedPaginator, GenerationOutcome, LabServices, LabWorkspace};
use fitlab_core::config::LabConfig;
use fitlab_core::draft::DraftDetails;
use fitlab_core::feed::PostDetails;
use fitlab_core::garment::GarmentSlot;
use fitlab_core::generation::GenerationService;
use fitlab_core::style::StyleParamsPatch;
use fitlab_infrastructure::{
    FileImageSource, HttpGenerationService, InMemoryDraftRepository, InMemoryFeed,
    RecordingNavigator, StubGenerationService,
};
use std::sync::Arc;

pub async fn run(args: TryOnArgs, config: &LabConfig) -> Result<()> {
    let feed = Arc::new(InMemoryFeed::new(&config.feed));
    let navigator = Arc::new(RecordingNavigator::new());
    let services = LabServices {
        generation: generation_service(config),
        drafts: Arc::new(InMemoryDraftRepository::new()),
        publisher: feed.clone(),
        navigator: navigator.clone(),
    };
    let mut lab = LabWorkspace::enter(services, config);

    let source = FileImageSource::new(Some(args.image.clone()))
        .with_max_file_size(config.upload.max_file_size);
    if !lab
        .collector()
        .upload(&source)
        .await
        .with_context(|| format!("Failed to use {}", args.image.display()))?
    {
        bail!("No image selected");
    }

    let references = [
        (GarmentSlot::Top, args.top),
        (GarmentSlot::Bottom, args.bottom),
        (GarmentSlot::Footwear, args.footwear),
    ];
    for (slot, reference) in references {
        if let Some(reference) = reference {
            let collector = lab.collector_mut();
            collector.set_pending(slot, reference);
            if let Some(garment) = collector.commit_pending(slot)? {
                println!("  ✓ {} {}", slot, garment.image_url);
            }
        }
    }

    let patch = StyleParamsPatch {
        style: args.style,
        fit: args.fit,
        occasion: args.occasion,
    };
    if !patch.is_empty() {
        lab.collector().update_style_params(patch);
    }

    println!("⏳ Generating...");
    let handle = lab.generate().await?;
    match handle.outcome().await {
        GenerationOutcome::Succeeded(image) => {
            println!(
                "✅ Generated {} in {} ms\n   {}",
                image.id, image.processing_time_ms, image.image_url
            );
        }
        GenerationOutcome::Failed(reason) => bail!("{}", reason),
        GenerationOutcome::Cancelled | GenerationOutcome::Discarded => {
            bail!("Generation did not complete")
        }
    }

    if args.save_draft {
        let details = DraftDetails {
            title: args.title.clone(),
            description: None,
        };
        let draft_id = lab.presenter().save_draft(&details).await?;
        println!("💾 Saved draft {}", draft_id);
    }

    if args.publish {
        let details = PostDetails {
            title: args.title,
            ..PostDetails::default()
        };
        let post_id = lab.presenter().publish(&details).await?;
        println!("📣 Published post {}", post_id);

        if let Some(route) = navigator.last_route() {
            println!("\n{}:", route);
        }
        let mut paginator = FeedPaginator::new(feed);
        paginator.load_more().await?;
        for post in paginator.items() {
            println!(
                "  - {} {}",
                post.title.as_deref().unwrap_or("(untitled)"),
                post.image_url
            );
        }
    }

    lab.leave().await;
    Ok(())
}

fn generation_service(config: &LabConfig) -> Arc<dyn GenerationService> {
    match HttpGenerationService::from_settings(&config.generation) {
        Some(service) => {
            tracing::info!("[fitlab] Using remote generation service");
            Arc::new(service)
        }
        None => {
            tracing::info!("[fitlab] No generation API configured, using stub service");
            Arc::new(StubGenerationService::from_settings(&config.generation))
        }
    }
}
