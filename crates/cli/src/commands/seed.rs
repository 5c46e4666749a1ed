//! Seed command handler.
//!
//! Populates the document database with the sample administrative
//! corpus. This plays the role of the external administration process
//! that owns the documents; the pipeline itself only reads them.

use clap::Args;
use guichet_core::{AppConfig, AppResult};
use guichet_retrieval::SqliteDocumentStore;

/// Seed the document database with the sample corpus
#[derive(Args, Debug)]
pub struct SeedCommand {
    /// Insert the corpus even if documents already exist
    #[arg(long)]
    pub force: bool,
}

/// One sample document: title, content, language, category.
type SeedDoc = (&'static str, &'static str, &'static str, &'static str);

const SEED_DOCUMENTS: &[SeedDoc] = &[
    (
        "Comment obtenir une carte d'identité nationale",
        "Pour obtenir une carte d'identité nationale au Maroc, rendez-vous à la préfecture ou \
         sous-préfecture de votre lieu de résidence avec les documents suivants : une copie de \
         l'acte de naissance, deux photos d'identité récentes (format 3.5 x 4.5 cm), un \
         justificatif de résidence (facture d'eau, d'électricité ou attestation d'hébergement) \
         et l'ancienne carte d'identité s'il s'agit d'un renouvellement. Le délai de délivrance \
         est généralement de 30 jours. Le coût est de 50 dirhams pour la première délivrance et \
         25 dirhams pour le renouvellement.",
        "fr",
        "identity",
    ),
    (
        "Comment obtenir un passeport marocain",
        "Pour obtenir un passeport marocain, remplissez le formulaire de demande puis fournissez \
         une copie de la carte d'identité nationale, une copie de l'acte de naissance, deux \
         photos d'identité récentes et un justificatif de résidence. Les frais sont de 300 \
         dirhams pour un passeport de 10 ans. La demande peut être faite en ligne sur le portail \
         www.passeport.ma ou directement à la préfecture.",
        "fr",
        "passport",
    ),
    (
        "Comment obtenir un certificat de résidence",
        "Le certificat de résidence est délivré par la commune ou la préfecture. Présentez votre \
         carte d'identité nationale et un justificatif de domicile récent (facture d'eau ou \
         d'électricité de moins de trois mois). Le certificat est généralement délivré le jour \
         même ou sous 48 heures et reste valable trois mois.",
        "fr",
        "certificates",
    ),
    (
        "Obtenir le permis de conduire",
        "L'inscription dans une auto-école agréée est obligatoire pour obtenir le permis de \
         conduire. La formation comprend au minimum 40 heures de théorie et 20 heures de \
         pratique. Le coût total varie entre 3000 et 5000 dirhams et la durée entre trois et \
         six mois. Les documents requis sont la carte d'identité nationale, un certificat \
         médical et des photos d'identité.",
        "fr",
        "transport",
    ),
    (
        "Demander un acte de naissance",
        "L'acte de naissance (extrait de naissance) se demande au bureau d'état civil de la \
         commune du lieu de naissance, sur présentation de la carte d'identité nationale ou du \
         livret de famille. La copie intégrale coûte 2 dirhams. Certaines communes proposent la \
         demande en ligne via le portail watiqa.ma avec livraison par courrier.",
        "fr",
        "civil_status",
    ),
    (
        "كيفية الحصول على جواز السفر",
        "للحصول على جواز السفر المغربي، املأ استمارة الطلب ثم قدم نسخة من البطاقة الوطنية \
         للتعريف ونسخة من عقد الازدياد وصورتين شخصيتين حديثتين وما يثبت السكنى. الرسوم 300 \
         درهم لجواز صالح لمدة 10 سنوات. يمكن تقديم الطلب عبر البوابة www.passeport.ma أو لدى \
         العمالة مباشرة.",
        "ar",
        "passport",
    ),
    (
        "الحصول على شهادة السكنى",
        "تسلم شهادة السكنى من طرف الجماعة أو المقاطعة. قدم بطاقتك الوطنية للتعريف وما يثبت \
         العنوان (فاتورة ماء أو كهرباء حديثة). تسلم الشهادة عادة في نفس اليوم وتبقى صالحة \
         لمدة ثلاثة أشهر.",
        "ar",
        "certificates",
    ),
];

impl SeedCommand {
    /// Execute the seed command.
    pub fn execute(&self, config: &AppConfig) -> AppResult<()> {
        let store = SqliteDocumentStore::open(&config.db_path)?;

        if !self.force && store.count_documents()? > 0 {
            println!("Documents already exist, skipping seed (use --force to insert anyway).");
            return Ok(());
        }

        for &(title, content, language, category) in SEED_DOCUMENTS {
            let id = store.insert_document(title, content, language, Some(category), None)?;
            tracing::debug!("Seeded document {} ({})", id, title);
        }

        println!(
            "Seeded {} documents into {:?}.",
            SEED_DOCUMENTS.len(),
            config.db_path
        );
        Ok(())
    }
}
